use crate::output::print_outcome;
use memory_bank_core::{engine::BuildInput, types::ComplexityLevel};
use std::path::Path;

pub fn run(
    root: &Path,
    phase: Option<String>,
    complexity: Option<ComplexityLevel>,
    json: bool,
) -> anyhow::Result<()> {
    let engine = super::open_engine(root)?;
    let outcome = engine.build(&BuildInput { phase, complexity })?;
    print_outcome(&outcome, json)
}
