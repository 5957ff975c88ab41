use super::{open_engine, required_str, MemoryBankTool};
use memory_bank_core::{engine::FinishInput, ModeOutcome};
use std::path::Path;

pub struct ReflectArchiveModeTool;

impl MemoryBankTool for ReflectArchiveModeTool {
    fn name(&self) -> &str {
        "reflect_archive_mode"
    }

    fn title(&self) -> &str {
        "REFLECT+ARCHIVE Mode"
    }

    fn description(&self) -> &str {
        "Reflect on implementation and archive documentation"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["reflect", "archive"],
                    "description": "reflect: Review implementation, archive: Create final documentation"
                }
            },
            "required": ["action"]
        })
    }

    fn call(&self, args: serde_json::Value, root: &Path) -> Result<ModeOutcome, String> {
        // Unknown actions reach the engine, which answers with an error outcome.
        let action = required_str(&args, "action")?;
        let engine = open_engine(root)?;
        engine
            .finish(&FinishInput {
                action: action.to_string(),
            })
            .map_err(|e| e.to_string())
    }
}
