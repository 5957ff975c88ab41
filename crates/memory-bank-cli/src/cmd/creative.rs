use crate::output::print_outcome;
use anyhow::Context;
use memory_bank_core::{engine::DesignInput, paths::validate_component_name, types::CreativeType};
use std::path::Path;

pub fn run(
    root: &Path,
    component: &str,
    creative_type: CreativeType,
    requirements: &[String],
    json: bool,
) -> anyhow::Result<()> {
    validate_component_name(component)?;
    let requirements =
        super::join_words(requirements).context("requirements must not be empty")?;

    let engine = super::open_engine(root)?;
    let outcome = engine.design(&DesignInput {
        component_name: component.to_string(),
        creative_type,
        requirements,
    })?;
    print_outcome(&outcome, json)
}
