use super::{open_engine, optional_str, MemoryBankTool};
use memory_bank_core::{engine::InitializeInput, types::ComplexityLevel, ModeOutcome};
use std::path::Path;

pub struct VanModeTool;

impl MemoryBankTool for VanModeTool {
    fn name(&self) -> &str {
        "van_mode"
    }

    fn title(&self) -> &str {
        "VAN Mode"
    }

    fn description(&self) -> &str {
        "Initialize project and determine complexity level. Entry point for the Memory Bank system."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "complexity": super::complexity_schema(
                    "Level 1: Quick bug fix, Level 2: Simple enhancement, Level 3-4: Complex features"
                ),
                "task_description": {
                    "type": "string",
                    "description": "Description of the task to be implemented"
                }
            },
            "required": ["complexity"]
        })
    }

    fn call(&self, args: serde_json::Value, root: &Path) -> Result<ModeOutcome, String> {
        let complexity: ComplexityLevel = super::complexity_arg(&args)?
            .ok_or_else(|| "missing required argument: complexity".to_string())?;
        let task_description = optional_str(&args, "task_description")?.map(str::to_string);

        let engine = open_engine(root)?;
        engine
            .initialize(&InitializeInput {
                complexity,
                task_description,
            })
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::read_doc;
    use memory_bank_core::types::Mode;
    use tempfile::TempDir;

    #[test]
    fn van_creates_tasks_and_context() {
        let dir = TempDir::new().unwrap();
        let outcome = VanModeTool
            .call(
                serde_json::json!({"complexity": "2", "task_description": "Dark mode toggle"}),
                dir.path(),
            )
            .unwrap();

        assert_eq!(outcome.next_mode, Some(Mode::Plan));
        assert!(read_doc(&dir, "tasks.md").contains("- **Task**: Dark mode toggle"));
        assert!(read_doc(&dir, "activeContext.md").contains("- Next Mode: PLAN"));
    }

    #[test]
    fn van_requires_complexity() {
        let dir = TempDir::new().unwrap();
        let err = VanModeTool
            .call(serde_json::json!({"task_description": "x"}), dir.path())
            .unwrap_err();
        assert!(err.contains("complexity"));
        assert_eq!(read_doc(&dir, "tasks.md"), "");
    }

    #[test]
    fn van_rejects_invalid_complexity() {
        let dir = TempDir::new().unwrap();
        assert!(VanModeTool
            .call(serde_json::json!({"complexity": "9"}), dir.path())
            .is_err());
    }
}
