use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryBankError {
    #[error("invalid complexity '{0}': must be 1, 2, 3, or 4")]
    InvalidComplexity(String),

    #[error("invalid creative type '{0}': must be architecture, algorithm, or uiux")]
    InvalidCreativeType(String),

    #[error("invalid action '{0}': use \"reflect\" or \"archive\"")]
    InvalidAction(String),

    #[error("invalid component name '{0}': must be non-empty with no path separators")]
    InvalidComponentName(String),

    #[error("invalid phase marker: {0}")]
    InvalidPhase(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

}

pub type Result<T> = std::result::Result<T, MemoryBankError>;
