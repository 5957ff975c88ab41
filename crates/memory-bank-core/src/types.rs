use crate::error::MemoryBankError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ComplexityLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComplexityLevel {
    One,
    Two,
    Three,
    Four,
}

impl ComplexityLevel {
    pub fn all() -> &'static [ComplexityLevel] {
        &[
            ComplexityLevel::One,
            ComplexityLevel::Two,
            ComplexityLevel::Three,
            ComplexityLevel::Four,
        ]
    }

    pub fn as_u8(self) -> u8 {
        match self {
            ComplexityLevel::One => 1,
            ComplexityLevel::Two => 2,
            ComplexityLevel::Three => 3,
            ComplexityLevel::Four => 4,
        }
    }

    pub fn from_u8(n: u8) -> Option<Self> {
        match n {
            1 => Some(ComplexityLevel::One),
            2 => Some(ComplexityLevel::Two),
            3 => Some(ComplexityLevel::Three),
            4 => Some(ComplexityLevel::Four),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ComplexityLevel::One => {
                "Quick bug fix - Direct implementation, minimal planning required"
            }
            ComplexityLevel::Two => {
                "Simple enhancement - Streamlined planning, straightforward implementation"
            }
            ComplexityLevel::Three => {
                "Complex feature - Comprehensive planning, creative phases may be required"
            }
            ComplexityLevel::Four => {
                "Major feature/refactor - Detailed architecture, phased implementation, creative design required"
            }
        }
    }

    /// Levels 3 and 4 go through CREATIVE before IMPLEMENT.
    pub fn requires_creative(self) -> bool {
        matches!(self, ComplexityLevel::Three | ComplexityLevel::Four)
    }

    /// Mode that follows VAN: level 1 skips planning entirely.
    pub fn next_after_van(self) -> Mode {
        match self {
            ComplexityLevel::One => Mode::Implement,
            _ => Mode::Plan,
        }
    }

    pub fn next_after_plan(self) -> Mode {
        if self.requires_creative() {
            Mode::Creative
        } else {
            Mode::Implement
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl std::str::FromStr for ComplexityLevel {
    type Err = MemoryBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(ComplexityLevel::One),
            "2" => Ok(ComplexityLevel::Two),
            "3" => Ok(ComplexityLevel::Three),
            "4" => Ok(ComplexityLevel::Four),
            other => Err(MemoryBankError::InvalidComplexity(other.to_string())),
        }
    }
}

impl TryFrom<String> for ComplexityLevel {
    type Error = MemoryBankError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ComplexityLevel> for String {
    fn from(level: ComplexityLevel) -> Self {
        level.to_string()
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// One named step of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Van,
    Plan,
    Creative,
    Implement,
    #[serde(rename = "REFLECT+ARCHIVE")]
    ReflectArchive,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Van => "VAN",
            Mode::Plan => "PLAN",
            Mode::Creative => "CREATIVE",
            Mode::Implement => "IMPLEMENT",
            Mode::ReflectArchive => "REFLECT+ARCHIVE",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Value of the `## Current Phase:` marker in the tasks document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Van,
    Plan,
    Creative,
    Implement,
    Completed,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Van => "VAN",
            Phase::Plan => "PLAN",
            Phase::Creative => "CREATIVE",
            Phase::Implement => "IMPLEMENT",
            Phase::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = MemoryBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VAN" => Ok(Phase::Van),
            "PLAN" => Ok(Phase::Plan),
            "CREATIVE" => Ok(Phase::Creative),
            "IMPLEMENT" => Ok(Phase::Implement),
            "COMPLETED" => Ok(Phase::Completed),
            other => Err(MemoryBankError::InvalidPhase(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CreativeType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeType {
    Architecture,
    Algorithm,
    #[serde(rename = "uiux")]
    UiUx,
}

impl CreativeType {
    pub fn as_str(self) -> &'static str {
        match self {
            CreativeType::Architecture => "architecture",
            CreativeType::Algorithm => "algorithm",
            CreativeType::UiUx => "uiux",
        }
    }
}

impl fmt::Display for CreativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CreativeType {
    type Err = MemoryBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "architecture" => Ok(CreativeType::Architecture),
            "algorithm" => Ok(CreativeType::Algorithm),
            "uiux" | "ui/ux" | "ui/interaction" | "ui" => Ok(CreativeType::UiUx),
            _ => Err(MemoryBankError::InvalidCreativeType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FinishAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishAction {
    Reflect,
    Archive,
}

impl FinishAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FinishAction::Reflect => "reflect",
            FinishAction::Archive => "archive",
        }
    }
}

impl fmt::Display for FinishAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FinishAction {
    type Err = MemoryBankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflect" => Ok(FinishAction::Reflect),
            "archive" => Ok(FinishAction::Archive),
            other => Err(MemoryBankError::InvalidAction(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_parse() {
        assert_eq!("1".parse::<ComplexityLevel>().unwrap(), ComplexityLevel::One);
        assert_eq!(" 4 ".parse::<ComplexityLevel>().unwrap(), ComplexityLevel::Four);
        for bad in ["0", "5", "", "three", "1.0"] {
            assert!(bad.parse::<ComplexityLevel>().is_err(), "expected invalid: {bad}");
        }
    }

    #[test]
    fn next_mode_after_van() {
        assert_eq!(ComplexityLevel::One.next_after_van(), Mode::Implement);
        for level in [ComplexityLevel::Two, ComplexityLevel::Three, ComplexityLevel::Four] {
            assert_eq!(level.next_after_van(), Mode::Plan);
        }
    }

    #[test]
    fn next_mode_after_plan() {
        assert_eq!(ComplexityLevel::One.next_after_plan(), Mode::Implement);
        assert_eq!(ComplexityLevel::Two.next_after_plan(), Mode::Implement);
        assert_eq!(ComplexityLevel::Three.next_after_plan(), Mode::Creative);
        assert_eq!(ComplexityLevel::Four.next_after_plan(), Mode::Creative);
    }

    #[test]
    fn complexity_serde_as_string() {
        let json = serde_json::to_string(&ComplexityLevel::Three).unwrap();
        assert_eq!(json, "\"3\"");
        let parsed: ComplexityLevel = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(parsed, ComplexityLevel::Two);
    }

    #[test]
    fn creative_type_aliases() {
        assert_eq!("uiux".parse::<CreativeType>().unwrap(), CreativeType::UiUx);
        assert_eq!(
            "ui/interaction".parse::<CreativeType>().unwrap(),
            CreativeType::UiUx
        );
        assert_eq!(
            "Architecture".parse::<CreativeType>().unwrap(),
            CreativeType::Architecture
        );
        assert!("database".parse::<CreativeType>().is_err());
    }

    #[test]
    fn phase_roundtrip_through_marker_text() {
        for phase in [
            Phase::Van,
            Phase::Plan,
            Phase::Creative,
            Phase::Implement,
            Phase::Completed,
        ] {
            assert_eq!(phase.as_str().parse::<Phase>().unwrap(), phase);
        }
    }

    #[test]
    fn finish_action_parse() {
        assert_eq!("reflect".parse::<FinishAction>().unwrap(), FinishAction::Reflect);
        assert!(matches!(
            "cancel".parse::<FinishAction>(),
            Err(MemoryBankError::InvalidAction(_))
        ));
    }
}
