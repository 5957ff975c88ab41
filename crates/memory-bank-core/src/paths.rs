use crate::error::{MemoryBankError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const MEMORY_BANK_DIR: &str = ".memory_bank";
pub const CONFIG_FILE: &str = "config.yaml";

pub const TASKS_FILE: &str = "tasks.md";
pub const ACTIVE_CONTEXT_FILE: &str = "activeContext.md";
pub const PROGRESS_FILE: &str = "progress.md";
pub const IMPLEMENTATION_PLAN_FILE: &str = "implementation-plan.md";
pub const REFLECTION_FILE: &str = "reflection.md";

pub const CREATIVE_PREFIX: &str = "creative-";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn memory_bank_dir(root: &Path) -> PathBuf {
    root.join(MEMORY_BANK_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    memory_bank_dir(root).join(CONFIG_FILE)
}

pub fn creative_filename(component: &str) -> String {
    format!("{CREATIVE_PREFIX}{component}.md")
}

// ---------------------------------------------------------------------------
// Component name validation
// ---------------------------------------------------------------------------

static COMPONENT_RE: OnceLock<Regex> = OnceLock::new();

fn component_re() -> &'static Regex {
    // Anything that stays a single file name inside the store directory.
    COMPONENT_RE.get_or_init(|| Regex::new(r"^[^/\\\x00]+$").unwrap())
}

/// Creative documents are keyed by a caller-supplied name that becomes part
/// of a file name, so it must not escape the store directory.
pub fn validate_component_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed.len() > 128
        || trimmed.contains("..")
        || !component_re().is_match(trimmed)
    {
        return Err(MemoryBankError::InvalidComponentName(name.to_string()));
    }
    Ok(())
}

/// True when `name` is a bare file name (no separators, no parent refs).
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && component_re().is_match(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
