use super::{complexity_arg, open_engine, MemoryBankTool};
use memory_bank_core::{engine::PlanInput, ModeOutcome};
use std::path::Path;

pub struct PlanModeTool;

impl MemoryBankTool for PlanModeTool {
    fn name(&self) -> &str {
        "plan_mode"
    }

    fn title(&self) -> &str {
        "PLAN Mode"
    }

    fn description(&self) -> &str {
        "Create detailed implementation plan based on complexity level"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "complexity": super::complexity_schema(
                    "Complexity level (optional, will read from tasks.md if not provided)"
                )
            }
        })
    }

    fn call(&self, args: serde_json::Value, root: &Path) -> Result<ModeOutcome, String> {
        let complexity = complexity_arg(&args)?;
        let engine = open_engine(root)?;
        engine
            .plan(&PlanInput { complexity })
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{test_support::read_doc, van_mode::VanModeTool};
    use memory_bank_core::types::Mode;
    use tempfile::TempDir;

    #[test]
    fn plan_reads_complexity_from_tasks() {
        let dir = TempDir::new().unwrap();
        VanModeTool
            .call(serde_json::json!({"complexity": "4"}), dir.path())
            .unwrap();

        let outcome = PlanModeTool.call(serde_json::json!({}), dir.path()).unwrap();
        assert_eq!(outcome.next_mode, Some(Mode::Creative));
        assert!(read_doc(&dir, "implementation-plan.md").contains("Level 4 (Complex Feature)"));
    }

    #[test]
    fn plan_without_state_is_error_outcome() {
        let dir = TempDir::new().unwrap();
        let outcome = PlanModeTool.call(serde_json::json!({}), dir.path()).unwrap();
        assert!(outcome.is_error());
        assert!(outcome.message.contains("Complexity level not found"));
        assert!(!dir.path().join(".memory_bank/implementation-plan.md").exists());
    }
}
