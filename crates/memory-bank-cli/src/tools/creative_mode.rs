use super::{open_engine, required_str, MemoryBankTool};
use memory_bank_core::{
    engine::DesignInput, paths::validate_component_name, types::CreativeType, ModeOutcome,
};
use std::path::Path;

pub struct CreativeModeTool;

impl MemoryBankTool for CreativeModeTool {
    fn name(&self) -> &str {
        "creative_mode"
    }

    fn title(&self) -> &str {
        "CREATIVE Mode"
    }

    fn description(&self) -> &str {
        "Design and architecture work for complex components"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "component_name": {
                    "type": "string",
                    "description": "Name of the component requiring creative design"
                },
                "creative_type": {
                    "type": "string",
                    "enum": ["architecture", "algorithm", "uiux"],
                    "description": "Type of creative work needed"
                },
                "requirements": {
                    "type": "string",
                    "description": "Requirements and constraints for the component"
                }
            },
            "required": ["component_name", "creative_type", "requirements"]
        })
    }

    fn call(&self, args: serde_json::Value, root: &Path) -> Result<ModeOutcome, String> {
        let component_name = required_str(&args, "component_name")?;
        validate_component_name(component_name).map_err(|e| e.to_string())?;
        let creative_type: CreativeType = required_str(&args, "creative_type")?
            .parse()
            .map_err(|e: memory_bank_core::MemoryBankError| e.to_string())?;
        let requirements = required_str(&args, "requirements")?;

        let engine = open_engine(root)?;
        engine
            .design(&DesignInput {
                component_name: component_name.to_string(),
                creative_type,
                requirements: requirements.to_string(),
            })
            .map_err(|e| e.to_string())
    }
}
