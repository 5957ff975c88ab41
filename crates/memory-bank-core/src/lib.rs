pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod paths;
pub mod record;
pub mod store;
pub mod templates;
pub mod types;

pub use engine::{ModeEngine, ModeOutcome};
pub use error::{MemoryBankError, Result};
pub use store::{Document, DocumentStore};
