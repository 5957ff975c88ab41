pub mod config;
pub mod creative;
pub mod finish;
pub mod implement;
pub mod mcp;
pub mod plan;
pub mod van;

use anyhow::Context;
use memory_bank_core::ModeEngine;
use std::path::Path;

pub(crate) fn open_engine(root: &Path) -> anyhow::Result<ModeEngine> {
    ModeEngine::open(root)
        .with_context(|| format!("failed to open memory bank at {}", root.display()))
}

/// Join trailing positional words into one argument; nothing given is `None`.
pub(crate) fn join_words(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}
