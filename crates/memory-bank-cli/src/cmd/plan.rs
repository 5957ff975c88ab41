use crate::output::print_outcome;
use memory_bank_core::{engine::PlanInput, types::ComplexityLevel};
use std::path::Path;

pub fn run(root: &Path, complexity: Option<ComplexityLevel>, json: bool) -> anyhow::Result<()> {
    let engine = super::open_engine(root)?;
    let outcome = engine.plan(&PlanInput { complexity })?;
    print_outcome(&outcome, json)
}
