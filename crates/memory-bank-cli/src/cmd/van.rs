use crate::output::print_outcome;
use memory_bank_core::{engine::InitializeInput, types::ComplexityLevel};
use std::path::Path;

pub fn run(
    root: &Path,
    complexity: ComplexityLevel,
    description: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let engine = super::open_engine(root)?;
    let outcome = engine.initialize(&InitializeInput {
        complexity,
        task_description: super::join_words(description),
    })?;
    print_outcome(&outcome, json)
}
