use super::{complexity_arg, open_engine, optional_str, MemoryBankTool};
use memory_bank_core::{engine::BuildInput, ModeOutcome};
use std::path::Path;

pub struct ImplementModeTool;

impl MemoryBankTool for ImplementModeTool {
    fn name(&self) -> &str {
        "implement_mode"
    }

    fn title(&self) -> &str {
        "IMPLEMENT Mode"
    }

    fn description(&self) -> &str {
        "Execute the implementation based on plan and creative decisions"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "phase": {
                    "type": "string",
                    "description": "Implementation phase (for complex projects)"
                },
                "complexity": super::complexity_schema(
                    "Complexity level (optional, will read from tasks.md if not provided)"
                )
            }
        })
    }

    fn call(&self, args: serde_json::Value, root: &Path) -> Result<ModeOutcome, String> {
        let complexity = complexity_arg(&args)?;
        let phase = optional_str(&args, "phase")?.map(str::to_string);
        let engine = open_engine(root)?;
        engine
            .build(&BuildInput { phase, complexity })
            .map_err(|e| e.to_string())
    }
}
