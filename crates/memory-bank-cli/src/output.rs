use memory_bank_core::{engine::TransitionOutcome, ModeOutcome};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a mode outcome. Error outcomes become a non-zero exit.
pub fn print_outcome(outcome: &ModeOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(outcome)?;
    }
    if outcome.is_error() {
        anyhow::bail!("{}", outcome.message);
    }
    if !json {
        println!("{}", outcome.message);
        for report in outcome
            .transitions
            .iter()
            .filter(|r| r.outcome == TransitionOutcome::Drifted)
        {
            let t = report.transition;
            match report.observed_phase {
                Some(phase) => eprintln!(
                    "warning: tasks.md marker '{}' not found (current phase is {phase}), {} left unchanged",
                    t.from_marker(),
                    t.as_str()
                ),
                None => eprintln!(
                    "warning: tasks.md marker '{}' not found, {} left unchanged",
                    t.from_marker(),
                    t.as_str()
                ),
            }
        }
    }
    Ok(())
}
