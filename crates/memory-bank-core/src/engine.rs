//! Mode engine: one handler per workflow mode.
//!
//! Each handler reads what it needs from the [`DocumentStore`], renders its
//! document from [`crate::templates`], advances markers in the tasks
//! document and returns a [`ModeOutcome`]. Expected failures (no complexity
//! level, unknown finish action) come back as error outcomes with nothing
//! written; `Err` is reserved for storage faults.
//!
//! Handlers run one at a time against a single store (see the store's
//! single-writer note). No handler calls another.

use crate::config::Config;
use crate::error::Result;
use crate::record::{self, TaskRecord, Transition};
use crate::store::{ArchiveLocation, Document, DocumentStore};
use crate::templates::{self, ArchiveParts};
use crate::types::{ComplexityLevel, CreativeType, FinishAction, Mode, Phase};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct InitializeInput {
    pub complexity: ComplexityLevel,
    pub task_description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PlanInput {
    pub complexity: Option<ComplexityLevel>,
}

#[derive(Debug, Clone)]
pub struct DesignInput {
    pub component_name: String,
    pub creative_type: CreativeType,
    pub requirements: String,
}

#[derive(Debug, Clone, Default)]
pub struct BuildInput {
    pub phase: Option<String>,
    pub complexity: Option<ComplexityLevel>,
}

/// The action stays a raw string: anything other than `reflect` or
/// `archive` is answered with an error outcome rather than rejected earlier.
#[derive(Debug, Clone)]
pub struct FinishInput {
    pub action: String,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOutcome {
    Applied,
    /// Prior marker absent but the target marker is already there.
    AlreadyApplied,
    /// Neither marker present: the tasks document was edited or never written.
    Drifted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionReport {
    pub transition: Transition,
    pub outcome: TransitionOutcome,
    /// Phase actually recorded in the tasks document when a phase
    /// transition drifted; `None` if no phase marker could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_phase: Option<Phase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeOutcome {
    pub mode: Mode,
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_mode: Option<Mode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<TransitionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveLocation>,
}

impl ModeOutcome {
    fn success(mode: Mode, message: String, next_mode: Option<Mode>) -> Self {
        Self {
            mode,
            status: OutcomeStatus::Success,
            message,
            next_mode,
            transitions: Vec::new(),
            archive: None,
        }
    }

    fn error(mode: Mode, message: impl Into<String>, next_mode: Option<Mode>) -> Self {
        Self {
            mode,
            status: OutcomeStatus::Error,
            message: message.into(),
            next_mode,
            transitions: Vec::new(),
            archive: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Error
    }

    /// Transitions that found neither their prior nor their target marker.
    pub fn drifted(&self) -> Vec<Transition> {
        self.transitions
            .iter()
            .filter(|r| r.outcome == TransitionOutcome::Drifted)
            .map(|r| r.transition)
            .collect()
    }
}

pub const MISSING_COMPLEXITY_PLAN: &str =
    "❌ Error: Complexity level not found. Please run VAN mode first or specify complexity level.";
pub const MISSING_COMPLEXITY_IMPLEMENT: &str =
    "❌ Error: Complexity level not found. Please run VAN mode first.";
pub const INVALID_ACTION: &str = "❌ Invalid action. Use \"reflect\" or \"archive\".";

// ---------------------------------------------------------------------------
// ModeEngine
// ---------------------------------------------------------------------------

pub struct ModeEngine {
    store: DocumentStore,
    config: Config,
    clock: fn() -> DateTime<Utc>,
}

impl ModeEngine {
    pub fn new(store: DocumentStore, config: Config) -> Self {
        Self {
            store,
            config,
            clock: Utc::now,
        }
    }

    /// Load config and open the store for a project root.
    pub fn open(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        let store = DocumentStore::open(root, &config)?;
        Ok(Self::new(store, config))
    }

    /// Replace the timestamp source (tests pin it for stable output).
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    // -----------------------------------------------------------------------
    // VAN
    // -----------------------------------------------------------------------

    pub fn initialize(&self, input: &InitializeInput) -> Result<ModeOutcome> {
        let complexity = input.complexity;
        let task = non_empty(input.task_description.as_deref())
            .unwrap_or(self.config.task_placeholder.as_str());

        let record = TaskRecord::new(complexity, task, self.now());
        self.store.write(&Document::Tasks, &record.render())?;
        self.store.write(
            &Document::ActiveContext,
            &templates::active_context(task, complexity),
        )?;

        let next = complexity.next_after_van();
        let next_label = match next {
            Mode::Implement => "IMPLEMENT (direct implementation)",
            _ => "PLAN (detailed planning required)",
        };
        tracing::info!(mode = %Mode::Van, complexity = %complexity, next = %next, "mode complete");

        Ok(ModeOutcome::success(
            Mode::Van,
            format!(
                "✅ VAN Mode initialized successfully!\n\n**Project Complexity**: Level {complexity}\n**Next Mode**: {next_label}\n\nMemory Bank files have been created and the project structure is ready."
            ),
            Some(next),
        ))
    }

    // -----------------------------------------------------------------------
    // PLAN
    // -----------------------------------------------------------------------

    pub fn plan(&self, input: &PlanInput) -> Result<ModeOutcome> {
        let tasks = self.store.read(&Document::Tasks);
        let Some(complexity) = input.complexity.or_else(|| record::parse_complexity(&tasks))
        else {
            tracing::info!(mode = %Mode::Plan, "complexity not found");
            return Ok(ModeOutcome::error(
                Mode::Plan,
                MISSING_COMPLEXITY_PLAN,
                Some(Mode::Van),
            ));
        };

        self.store.write(
            &Document::ImplementationPlan,
            &templates::implementation_plan(complexity, &self.now()),
        )?;
        let transitions = self.advance_tasks(
            &tasks,
            &[Transition::CheckPlan, Transition::PhaseVanToPlan],
        )?;

        let next = complexity.next_after_plan();
        let detail = if complexity.requires_creative() {
            "Creative phases identified - design decisions required before implementation."
        } else {
            "Ready for direct implementation."
        };
        tracing::info!(mode = %Mode::Plan, complexity = %complexity, next = %next, "mode complete");

        let mut outcome = ModeOutcome::success(
            Mode::Plan,
            format!(
                "✅ PLAN Mode completed!\n\n**Implementation plan created** for Level {complexity} complexity.\n**Next Mode**: {next}\n\n{detail}"
            ),
            Some(next),
        );
        outcome.transitions = transitions;
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // CREATIVE
    // -----------------------------------------------------------------------

    pub fn design(&self, input: &DesignInput) -> Result<ModeOutcome> {
        let doc = templates::creative_document(
            &input.component_name,
            input.creative_type,
            &input.requirements,
            &self.now(),
        );
        self.store
            .write(&Document::Creative(input.component_name.clone()), &doc)?;

        let tasks = self.store.read(&Document::Tasks);
        let transitions = self.advance_tasks(&tasks, &[Transition::CheckCreative])?;
        tracing::info!(
            mode = %Mode::Creative,
            component = %input.component_name,
            creative_type = %input.creative_type,
            "mode complete"
        );

        let mut outcome = ModeOutcome::success(
            Mode::Creative,
            format!(
                "✅ CREATIVE Mode initialized for {}!\n\n**Creative Type**: {}\n**Status**: Design template created\n**Next**: Complete the design options and analysis, then proceed to IMPLEMENT mode.",
                input.component_name, input.creative_type
            ),
            Some(Mode::Implement),
        );
        outcome.transitions = transitions;
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // IMPLEMENT
    // -----------------------------------------------------------------------

    pub fn build(&self, input: &BuildInput) -> Result<ModeOutcome> {
        let tasks = self.store.read(&Document::Tasks);
        let Some(complexity) = input.complexity.or_else(|| record::parse_complexity(&tasks))
        else {
            tracing::info!(mode = %Mode::Implement, "complexity not found");
            return Ok(ModeOutcome::error(
                Mode::Implement,
                MISSING_COMPLEXITY_IMPLEMENT,
                Some(Mode::Van),
            ));
        };

        let phase = non_empty(input.phase.as_deref());
        let phase_label = phase.unwrap_or(self.config.default_build_phase.as_str());
        let steps = templates::build_steps(complexity, phase);
        self.store.write(
            &Document::Progress,
            &templates::progress_document(phase_label, complexity, &steps, &self.now()),
        )?;
        let transitions = self.advance_tasks(&tasks, &[Transition::CheckImplement])?;
        tracing::info!(mode = %Mode::Implement, complexity = %complexity, phase = phase_label, "mode complete");

        let mut outcome = ModeOutcome::success(
            Mode::Implement,
            format!(
                "✅ IMPLEMENT Mode started!\n\n**Complexity**: Level {complexity}\n**Phase**: {phase_label}\n**Status**: Implementation guide created\n**Next**: Complete implementation then proceed to REFLECT+ARCHIVE mode."
            ),
            Some(Mode::ReflectArchive),
        );
        outcome.transitions = transitions;
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // REFLECT+ARCHIVE
    // -----------------------------------------------------------------------

    pub fn finish(&self, input: &FinishInput) -> Result<ModeOutcome> {
        match input.action.parse::<FinishAction>() {
            Ok(FinishAction::Reflect) => self.reflect(),
            Ok(FinishAction::Archive) => self.archive(),
            Err(_) => {
                tracing::info!(mode = %Mode::ReflectArchive, action = %input.action, "invalid action");
                Ok(ModeOutcome::error(Mode::ReflectArchive, INVALID_ACTION, None))
            }
        }
    }

    fn reflect(&self) -> Result<ModeOutcome> {
        self.store.write(
            &Document::Reflection,
            &templates::reflection_document(&self.now()),
        )?;
        let tasks = self.store.read(&Document::Tasks);
        let transitions = self.advance_tasks(&tasks, &[Transition::CompleteReflection])?;
        tracing::info!(mode = %Mode::ReflectArchive, action = "reflect", "mode complete");

        let mut outcome = ModeOutcome::success(
            Mode::ReflectArchive,
            "✅ REFLECTION completed!\n\nReflection document created. Please review and complete the reflection sections, then use action \"archive\" to create the final archive.".to_string(),
            Some(Mode::ReflectArchive),
        );
        outcome.transitions = transitions;
        Ok(outcome)
    }

    fn archive(&self) -> Result<ModeOutcome> {
        let tasks = self.store.read(&Document::Tasks);
        let reflection = self.store.read(&Document::Reflection);
        let plan = self.store.read(&Document::ImplementationPlan);
        let progress = self.store.read(&Document::Progress);

        let summary = record::extract_project_summary(&tasks)
            .unwrap_or_else(|| templates::SUMMARY_UNAVAILABLE.to_string());
        let doc = templates::archive_document(
            &ArchiveParts {
                summary: &summary,
                plan: &plan,
                progress: &progress,
                reflection: &reflection,
            },
            &self.now(),
        );
        let location = self.store.write_archive(&doc)?;

        let transitions = self.advance_tasks(
            &tasks,
            &[Transition::MarkArchived, Transition::PhasePlanToCompleted],
        )?;

        // The reset names the configured location; a fallback write is
        // carried in `outcome.archive`.
        let shown = self.config.archive_display_path();
        if location.is_fallback() {
            tracing::warn!(path = %location.path().display(), configured = %shown, "archive written to fallback location");
        }
        self.store.write(
            &Document::ActiveContext,
            &templates::active_context_reset(&shown),
        )?;
        tracing::info!(mode = %Mode::ReflectArchive, action = "archive", archive = %shown, "mode complete");

        let mut outcome = ModeOutcome::success(
            Mode::ReflectArchive,
            format!(
                "✅ ARCHIVING completed!\n\n📦 Project archived successfully\n📁 Archive location: {shown}\n\n🎉 Task fully completed! Ready for next task - use VAN mode to initialize."
            ),
            Some(Mode::Van),
        );
        outcome.transitions = transitions;
        outcome.archive = Some(location);
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Apply marker transitions to `tasks` and write the document back if any
    /// of them took effect. A document where nothing applied is left untouched.
    fn advance_tasks(
        &self,
        tasks: &str,
        transitions: &[Transition],
    ) -> Result<Vec<TransitionReport>> {
        let (updated, results) = record::apply_all(tasks, transitions);

        let observed = record::parse_phase(tasks);
        let reports: Vec<TransitionReport> = results
            .into_iter()
            .map(|(transition, applied)| {
                let outcome = if applied {
                    TransitionOutcome::Applied
                } else if tasks.contains(transition.to_marker()) {
                    TransitionOutcome::AlreadyApplied
                } else {
                    TransitionOutcome::Drifted
                };
                let observed_phase = match (outcome, transition.phase_change()) {
                    (TransitionOutcome::Drifted, Some(_)) => observed,
                    _ => None,
                };
                match outcome {
                    TransitionOutcome::Drifted => tracing::warn!(
                        transition = transition.as_str(),
                        marker = transition.from_marker(),
                        observed_phase = ?observed_phase,
                        "tasks marker not found, transition skipped"
                    ),
                    TransitionOutcome::AlreadyApplied => tracing::debug!(
                        transition = transition.as_str(),
                        "transition already applied"
                    ),
                    TransitionOutcome::Applied => {}
                }
                TransitionReport {
                    transition,
                    outcome,
                    observed_phase,
                }
            })
            .collect();

        if reports
            .iter()
            .any(|r| r.outcome == TransitionOutcome::Applied)
        {
            self.store.write(&Document::Tasks, &updated)?;
        }
        Ok(reports)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
