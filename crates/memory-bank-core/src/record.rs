//! Task record: the structured view of `tasks.md` and its markdown adapter.
//!
//! The tasks document stays human-editable, so the engine never re-renders
//! it after initialization. Progress is recorded by rewriting exact marker
//! substrings (see [`Transition`]); a marker that was hand-edited away makes
//! the transition a no-op, which is reported as drift rather than an error.

use crate::templates::iso_timestamp;
use crate::types::{ComplexityLevel, Phase};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const PROJECT_OVERVIEW_HEADING: &str = "## Project Overview";
pub const PHASE_MARKER_PREFIX: &str = "Current Phase: ";

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Van,
    Plan,
    Creative,
    Implement,
    ReflectArchive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    Done,
    /// REFLECT+ARCHIVE only: reflection written, archive not yet produced.
    ReflectionComplete,
    /// REFLECT+ARCHIVE only.
    Archived,
}

fn checklist_line(step: Step, state: StepState) -> &'static str {
    use Step::*;
    use StepState::*;
    match (step, state) {
        (Van, Pending) => "- [ ] VAN Mode: Project initialization",
        (Van, _) => "- [x] VAN Mode: Project initialization ✅",
        (Plan, Pending) => "- [ ] PLAN Mode: Implementation planning",
        (Plan, _) => "- [x] PLAN Mode: Implementation planning ✅",
        (Creative, Pending) => "- [ ] CREATIVE Mode: Design decisions (if required)",
        (Creative, _) => "- [x] CREATIVE Mode: Design decisions ✅",
        (Implement, Pending) => "- [ ] IMPLEMENT Mode: Code implementation",
        (Implement, _) => "- [x] IMPLEMENT Mode: Code implementation ✅",
        (ReflectArchive, Pending) => "- [ ] REFLECT+ARCHIVE Mode: Completion and documentation",
        (ReflectArchive, Done | ReflectionComplete) => {
            "- [x] REFLECT+ARCHIVE Mode: Reflection complete ✅"
        }
        (ReflectArchive, Archived) => "- [x] REFLECT+ARCHIVE Mode: Completed and Archived ✅",
    }
}

// ---------------------------------------------------------------------------
// TaskRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    pub complexity: ComplexityLevel,
    pub task: String,
    pub initialized_at: DateTime<Utc>,
    pub phase: Phase,
    pub checklist: [(Step, StepState); 5],
}

impl TaskRecord {
    /// Fresh record as written by VAN: phase VAN, every box pending.
    pub fn new(
        complexity: ComplexityLevel,
        task: impl Into<String>,
        initialized_at: DateTime<Utc>,
    ) -> Self {
        Self {
            complexity,
            task: task.into(),
            initialized_at,
            phase: Phase::Van,
            checklist: [
                (Step::Van, StepState::Pending),
                (Step::Plan, StepState::Pending),
                (Step::Creative, StepState::Pending),
                (Step::Implement, StepState::Pending),
                (Step::ReflectArchive, StepState::Pending),
            ],
        }
    }

    pub fn render(&self) -> String {
        let checklist = self
            .checklist
            .iter()
            .map(|(step, state)| checklist_line(*step, *state))
            .collect::<Vec<_>>()
            .join("\n");
        let next_steps = match self.complexity {
            ComplexityLevel::One => "Proceed directly to IMPLEMENT mode",
            _ => "Move to PLAN mode for detailed planning",
        };
        format!(
            "# Memory Bank System

{PROJECT_OVERVIEW_HEADING}
- **Complexity Level**: {complexity}
- **Task**: {task}
- **Initialized**: {initialized}

## Status
{checklist}

## {PHASE_MARKER_PREFIX}{phase}
**Next Steps**: {next_steps}

## Memory Bank Files
- tasks.md: ✅ Initialized
- activeContext.md: Pending
- progress.md: Pending
- implementation-plan.md: Pending
",
            complexity = self.complexity,
            task = self.task,
            initialized = iso_timestamp(&self.initialized_at),
            phase = self.phase,
        )
    }
}

// ---------------------------------------------------------------------------
// Pattern recovery
// ---------------------------------------------------------------------------

static COMPLEXITY_RE: OnceLock<Regex> = OnceLock::new();
static PHASE_RE: OnceLock<Regex> = OnceLock::new();

/// Complexity embedded in the tasks document as `Complexity Level**: N`.
/// A digit outside 1..=4 counts as absent.
pub fn parse_complexity(text: &str) -> Option<ComplexityLevel> {
    let re = COMPLEXITY_RE.get_or_init(|| Regex::new(r"Complexity Level\*\*: (\d)").unwrap());
    let caps = re.captures(text)?;
    caps[1].parse().ok()
}

pub fn parse_phase(text: &str) -> Option<Phase> {
    let re = PHASE_RE.get_or_init(|| Regex::new(r"Current Phase: ([A-Z]+)").unwrap());
    let caps = re.captures(text)?;
    caps[1].parse().ok()
}

/// The `## Project Overview` section: from the heading line up to, but not
/// including, the next `## ` heading (or the end of the document).
pub fn extract_project_summary(tasks: &str) -> Option<String> {
    let lines: Vec<&str> = tasks.split('\n').collect();
    let start = lines
        .iter()
        .position(|l| l.contains(PROJECT_OVERVIEW_HEADING))?;
    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, l)| l.starts_with("## ") && !l.contains("Project Overview"))
        .map(|(i, _)| i)
        .unwrap_or(lines.len());
    Some(lines[start..end].join("\n"))
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// A one-shot rewrite of a literal marker in the tasks document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    CheckPlan,
    PhaseVanToPlan,
    CheckCreative,
    CheckImplement,
    CompleteReflection,
    MarkArchived,
    PhasePlanToCompleted,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::CheckPlan => "check_plan",
            Transition::PhaseVanToPlan => "phase_van_to_plan",
            Transition::CheckCreative => "check_creative",
            Transition::CheckImplement => "check_implement",
            Transition::CompleteReflection => "complete_reflection",
            Transition::MarkArchived => "mark_archived",
            Transition::PhasePlanToCompleted => "phase_plan_to_completed",
        }
    }

    /// Exact text that must be present for the transition to apply.
    pub fn from_marker(self) -> &'static str {
        match self {
            Transition::CheckPlan => checklist_line(Step::Plan, StepState::Pending),
            Transition::PhaseVanToPlan => "Current Phase: VAN",
            Transition::CheckCreative => checklist_line(Step::Creative, StepState::Pending),
            Transition::CheckImplement => checklist_line(Step::Implement, StepState::Pending),
            Transition::CompleteReflection => {
                checklist_line(Step::ReflectArchive, StepState::Pending)
            }
            Transition::MarkArchived => "REFLECT+ARCHIVE Mode: Reflection complete ✅",
            Transition::PhasePlanToCompleted => "Current Phase: PLAN",
        }
    }

    pub fn to_marker(self) -> &'static str {
        match self {
            Transition::CheckPlan => checklist_line(Step::Plan, StepState::Done),
            Transition::PhaseVanToPlan => "Current Phase: PLAN",
            Transition::CheckCreative => checklist_line(Step::Creative, StepState::Done),
            Transition::CheckImplement => checklist_line(Step::Implement, StepState::Done),
            Transition::CompleteReflection => {
                checklist_line(Step::ReflectArchive, StepState::ReflectionComplete)
            }
            Transition::MarkArchived => "REFLECT+ARCHIVE Mode: Completed and Archived ✅",
            Transition::PhasePlanToCompleted => "Current Phase: COMPLETED",
        }
    }

    /// Phase edge for marker transitions that move the phase. A drifted
    /// phase transition is reported with the phase actually found.
    pub fn phase_change(self) -> Option<(Phase, Phase)> {
        match self {
            Transition::PhaseVanToPlan => Some((Phase::Van, Phase::Plan)),
            Transition::PhasePlanToCompleted => Some((Phase::Plan, Phase::Completed)),
            _ => None,
        }
    }

    /// Replace the first occurrence of the prior marker. `applied` is false
    /// and the text is returned unchanged when the marker is absent.
    pub fn apply(self, text: &str) -> Applied {
        let from = self.from_marker();
        if text.contains(from) {
            Applied {
                text: text.replacen(from, self.to_marker(), 1),
                applied: true,
            }
        } else {
            Applied {
                text: text.to_string(),
                applied: false,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    pub applied: bool,
}

/// Apply `transitions` in order, collecting which ones took effect.
pub fn apply_all(text: &str, transitions: &[Transition]) -> (String, Vec<(Transition, bool)>) {
    let mut current = text.to_string();
    let mut results = Vec::with_capacity(transitions.len());
    for t in transitions {
        let Applied { text, applied } = t.apply(&current);
        current = text;
        results.push((*t, applied));
    }
    (current, results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn record(level: ComplexityLevel) -> TaskRecord {
        TaskRecord::new(level, "Fix login redirect", ts())
    }

    #[test]
    fn render_matches_template() {
        let text = record(ComplexityLevel::Two).render();
        let expected = "# Memory Bank System

## Project Overview
- **Complexity Level**: 2
- **Task**: Fix login redirect
- **Initialized**: 2025-03-14T09:26:53.000Z

## Status
- [ ] VAN Mode: Project initialization
- [ ] PLAN Mode: Implementation planning
- [ ] CREATIVE Mode: Design decisions (if required)
- [ ] IMPLEMENT Mode: Code implementation
- [ ] REFLECT+ARCHIVE Mode: Completion and documentation

## Current Phase: VAN
**Next Steps**: Move to PLAN mode for detailed planning

## Memory Bank Files
- tasks.md: ✅ Initialized
- activeContext.md: Pending
- progress.md: Pending
- implementation-plan.md: Pending
";
        assert_eq!(text, expected);
    }

    #[test]
    fn level_one_next_steps_skip_planning() {
        let text = record(ComplexityLevel::One).render();
        assert!(text.contains("**Next Steps**: Proceed directly to IMPLEMENT mode"));
    }

    #[test]
    fn parse_complexity_from_text() {
        assert_eq!(
            parse_complexity("- **Complexity Level**: 3\n"),
            Some(ComplexityLevel::Three)
        );
        assert_eq!(parse_complexity(""), None);
        assert_eq!(parse_complexity("- **Complexity Level**: 7"), None);
        assert_eq!(parse_complexity("Complexity Level: 3"), None);
    }

    #[test]
    fn parse_phase_from_text() {
        assert_eq!(parse_phase("## Current Phase: COMPLETED"), Some(Phase::Completed));
        assert_eq!(parse_phase("## Current Phase: Done"), None);
        assert_eq!(parse_phase("nothing here"), None);
    }

    #[test]
    fn transition_applies_once() {
        let text = record(ComplexityLevel::Two).render();
        let first = Transition::CheckPlan.apply(&text);
        assert!(first.applied);
        assert!(first.text.contains("- [x] PLAN Mode: Implementation planning ✅"));

        let second = Transition::CheckPlan.apply(&first.text);
        assert!(!second.applied);
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn drifted_marker_is_byte_for_byte_noop() {
        let edited = record(ComplexityLevel::Two)
            .render()
            .replace("Current Phase: VAN", "Current Phase:  VAN (edited)")
            .replace("- [ ] PLAN Mode", "- [ ]  PLAN Mode");
        let (after, results) = apply_all(
            &edited,
            &[Transition::CheckPlan, Transition::PhaseVanToPlan],
        );
        assert_eq!(after.as_bytes(), edited.as_bytes());
        assert!(results.iter().all(|(_, applied)| !applied));
    }

    #[test]
    fn archive_transitions_need_prior_reflection() {
        let text = record(ComplexityLevel::Two).render();
        // Phase still VAN and reflection not recorded: neither marker is present.
        let (after, results) = apply_all(
            &text,
            &[Transition::MarkArchived, Transition::PhasePlanToCompleted],
        );
        assert_eq!(after, text);
        assert_eq!(
            results,
            vec![
                (Transition::MarkArchived, false),
                (Transition::PhasePlanToCompleted, false)
            ]
        );
    }

    #[test]
    fn phase_edges_match_markers() {
        for t in [Transition::PhaseVanToPlan, Transition::PhasePlanToCompleted] {
            let (from, to) = t.phase_change().unwrap();
            assert_eq!(parse_phase(t.from_marker()), Some(from));
            assert_eq!(parse_phase(t.to_marker()), Some(to));
        }
    }

    #[test]
    fn phase_edges() {
        assert_eq!(
            Transition::PhaseVanToPlan.phase_change(),
            Some((Phase::Van, Phase::Plan))
        );
        assert_eq!(Transition::CheckCreative.phase_change(), None);
    }

    #[test]
    fn project_summary_slice() {
        let text = record(ComplexityLevel::One).render();
        let summary = extract_project_summary(&text).unwrap();
        assert_eq!(
            summary,
            "## Project Overview
- **Complexity Level**: 1
- **Task**: Fix login redirect
- **Initialized**: 2025-03-14T09:26:53.000Z
"
        );
    }

    #[test]
    fn project_summary_runs_to_end_without_next_heading() {
        let text = "intro\n## Project Overview\n- a\n- b";
        assert_eq!(
            extract_project_summary(text).unwrap(),
            "## Project Overview\n- a\n- b"
        );
    }

    #[test]
    fn project_summary_missing_heading() {
        assert_eq!(extract_project_summary("# Something else\n"), None);
        assert_eq!(extract_project_summary(""), None);
    }
}
