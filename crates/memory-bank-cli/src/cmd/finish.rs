use crate::output::print_outcome;
use memory_bank_core::engine::FinishInput;
use std::path::Path;

/// `reflect`, `archive` and `finish <action>` all land here. The action is
/// not checked first so an unknown one gets the engine's own answer.
pub fn run(root: &Path, action: &str, json: bool) -> anyhow::Result<()> {
    let engine = super::open_engine(root)?;
    let outcome = engine.finish(&FinishInput {
        action: action.to_string(),
    })?;
    if !json {
        if let Some(loc) = outcome.archive.as_ref().filter(|l| l.is_fallback()) {
            eprintln!(
                "warning: archive directory unavailable, archive written to {}",
                loc.path().display()
            );
        }
    }
    print_outcome(&outcome, json)
}
