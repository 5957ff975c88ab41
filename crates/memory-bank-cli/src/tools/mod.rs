use memory_bank_core::{types::ComplexityLevel, ModeEngine, ModeOutcome};
use serde_json::Value;
use std::path::Path;

pub mod creative_mode;
pub mod implement_mode;
pub mod plan_mode;
pub mod reflect_archive_mode;
pub mod van_mode;

pub trait MemoryBankTool: Send + Sync {
    fn name(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> serde_json::Value;
    /// `Err` covers bad arguments and storage faults; expected mode failures
    /// come back as an error-status outcome.
    fn call(&self, args: Value, root: &Path) -> Result<ModeOutcome, String>;
}

pub fn all_tools() -> Vec<Box<dyn MemoryBankTool>> {
    vec![
        Box::new(van_mode::VanModeTool),
        Box::new(plan_mode::PlanModeTool),
        Box::new(creative_mode::CreativeModeTool),
        Box::new(implement_mode::ImplementModeTool),
        Box::new(reflect_archive_mode::ReflectArchiveModeTool),
    ]
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

pub(crate) fn open_engine(root: &Path) -> Result<ModeEngine, String> {
    ModeEngine::open(root).map_err(|e| e.to_string())
}

/// Complexity as `"1".."4"` or a bare integer; absent or null is `None`.
pub(crate) fn complexity_arg(args: &Value) -> Result<Option<ComplexityLevel>, String> {
    match &args["complexity"] {
        Value::Null => Ok(None),
        Value::String(s) => s
            .parse::<ComplexityLevel>()
            .map(Some)
            .map_err(|e| e.to_string()),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(ComplexityLevel::from_u8)
            .map(Some)
            .ok_or_else(|| format!("invalid complexity '{n}': must be 1, 2, 3, or 4")),
        other => Err(format!("invalid complexity '{other}': must be 1, 2, 3, or 4")),
    }
}

pub(crate) fn optional_str<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>, String> {
    match &args[key] {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        _ => Err(format!("argument '{key}' must be a string")),
    }
}

pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args[key]
        .as_str()
        .ok_or_else(|| format!("missing required argument: {key}"))
}

pub(crate) fn complexity_schema(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "enum": ["1", "2", "3", "4"],
        "description": description
    })
}
