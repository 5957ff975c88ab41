//! Document templates. Pure functions of their inputs; timestamps are passed
//! in so output is deterministic.

use crate::types::{ComplexityLevel, CreativeType};
use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Active context
// ---------------------------------------------------------------------------

pub fn active_context(task: &str, complexity: ComplexityLevel) -> String {
    format!(
        "# Active Context

## Current Task
{task}

## Complexity Level: {complexity}
{description}

## Current Mode: VAN
- Status: Completed
- Next Mode: {next}
",
        description = complexity.description(),
        next = complexity.next_after_van(),
    )
}

pub fn active_context_reset(archive_location: &str) -> String {
    format!(
        "# Active Context

## Status: Ready for New Task
Previous task has been completed and archived.

**Next Steps**: Use VAN mode to initialize a new task.

**Archive Location**: {archive_location}
"
    )
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

pub fn implementation_plan(complexity: ComplexityLevel, created: &DateTime<Utc>) -> String {
    let created = iso_timestamp(created);
    match complexity {
        ComplexityLevel::One => format!(
            "# Implementation Plan - Level 1 (Quick Fix)

## Overview
Quick bug fix implementation plan.

## Implementation Steps
1. Identify the bug location
2. Implement targeted fix
3. Test the fix
4. Verify no regression

## Files to Modify
*List files that need changes*

## Testing Strategy
*How to verify the fix works*

**Created**: {created}
"
        ),
        ComplexityLevel::Two => format!(
            "# Implementation Plan - Level 2 (Simple Enhancement)

## Overview of Changes
*Describe what needs to be enhanced*

## Files to Modify
*List files that need changes*

## Implementation Steps
1. *Step 1*
2. *Step 2*
3. *Step 3*

## Potential Challenges
*List any anticipated issues*

## Testing Strategy
*How to test the enhancement*

**Created**: {created}
"
        ),
        ComplexityLevel::Three | ComplexityLevel::Four => format!(
            "# Implementation Plan - Level {complexity} (Complex Feature)

## Requirements Analysis
*Detailed requirements breakdown*

## Components Affected
*List all components that will be modified or created*

## Architecture Considerations
*High-level architectural decisions*

## Creative Phase Components
*Components requiring design decisions:*
- [ ] Architecture Design: *Component name*
- [ ] Algorithm Design: *Component name*
- [ ] UI/UX Design: *Component name*

## Implementation Strategy
*Overall approach to implementation*

## Detailed Steps
### Phase 1: Core Components
1. *Step 1*
2. *Step 2*

### Phase 2: Secondary Components
1. *Step 1*
2. *Step 2*

### Phase 3: Integration & Polish
1. *Step 1*
2. *Step 2*

## Dependencies
*External and internal dependencies*

## Challenges & Mitigations
*Potential issues and solutions*

**Created**: {created}
"
        ),
    }
}

// ---------------------------------------------------------------------------
// Creative
// ---------------------------------------------------------------------------

pub fn creative_document(
    component: &str,
    creative_type: CreativeType,
    requirements: &str,
    started: &DateTime<Utc>,
) -> String {
    format!(
        "# 🎨🎨🎨 ENTERING CREATIVE PHASE: {banner}

## Component: {component}
**Type**: {creative_type}
**Started**: {started}

## Requirements & Constraints
{requirements}

## Design Options
*To be filled with multiple design approaches*

### Option 1: [Name]
**Pros:**
-

**Cons:**
-

### Option 2: [Name]
**Pros:**
-

**Cons:**
-

## Recommended Approach
*Selection with justification*

## Implementation Guidelines
*How to implement the selected solution*

## Verification
*Does solution meet requirements?*

# 🎨🎨🎨 EXITING CREATIVE PHASE
",
        banner = creative_type.as_str().to_uppercase(),
        started = iso_timestamp(started),
    )
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Ordered build steps for the progress document. `phase` only appears in
/// the level 3/4 variant; `None` renders as "Core Implementation".
pub fn build_steps(complexity: ComplexityLevel, phase: Option<&str>) -> String {
    match complexity {
        ComplexityLevel::One => "### Level 1 Build Process:
1. 🔍 Review bug report
2. 👁️ Examine relevant code
3. ⚒️ Implement targeted fix
4. ✅ Test fix
5. 📝 Update documentation"
            .to_string(),
        ComplexityLevel::Two => "### Level 2 Build Process:
1. 📋 Follow build plan
2. 🔨 Build each component
3. ✅ Test each component
4. 🔄 Verify integration
5. 📝 Document build details"
            .to_string(),
        ComplexityLevel::Three | ComplexityLevel::Four => format!(
            "### Level {complexity} Build Process:
**Phase**: {phase}

1. 🎨 Review creative phase decisions
2. 🏗️ Build in planned phases
3. ✅ Test each phase thoroughly
4. 🔄 Integration testing
5. 📝 Detailed documentation
6. 🔍 Comprehensive review",
            phase = phase.unwrap_or("Core Implementation"),
        ),
    }
}

pub fn progress_document(
    phase_label: &str,
    complexity: ComplexityLevel,
    steps: &str,
    started: &DateTime<Utc>,
) -> String {
    format!(
        "# Implementation Progress

## Phase: {phase_label}
**Complexity Level**: {complexity}
**Started**: {started}

## Build Steps
{steps}

## Status
- [ ] Core implementation
- [ ] Testing
- [ ] Integration
- [ ] Documentation

## Notes
*Implementation notes and decisions*
",
        started = iso_timestamp(started),
    )
}

// ---------------------------------------------------------------------------
// Reflect / archive
// ---------------------------------------------------------------------------

pub fn reflection_document(completed: &DateTime<Utc>) -> String {
    format!(
        "# Implementation Reflection

## Implementation Review
**Completed**: {completed}

### What Went Well (Successes)
- *Document successful aspects of the implementation*

### Challenges Encountered
- *Document difficulties and how they were resolved*

### Lessons Learned
- *Key insights from this implementation*

### Process Improvements
- *Suggestions for improving the development process*

### Technical Improvements
- *Technical insights and potential optimizations*

## Comparison to Plan
*How did the actual implementation compare to the original plan?*

## Final Status
- [ ] Implementation complete
- [ ] Testing complete
- [ ] Documentation complete
- [ ] Ready for archive

**Next Step**: Type 'ARCHIVE NOW' to proceed with archiving.
",
        completed = iso_timestamp(completed),
    )
}

pub const SUMMARY_UNAVAILABLE: &str = "Project summary not available";

pub struct ArchiveParts<'a> {
    pub summary: &'a str,
    pub plan: &'a str,
    pub progress: &'a str,
    pub reflection: &'a str,
}

pub fn archive_document(parts: &ArchiveParts<'_>, archived: &DateTime<Utc>) -> String {
    format!(
        "# Project Archive

**Archived**: {archived}

## Project Summary
{summary}

## Implementation Plan
{plan}

## Implementation Progress
{progress}

## Reflection
{reflection}

## Final Status
✅ Project completed and archived

## Files Included
- tasks.md
- implementation-plan.md
- progress.md
- reflection.md
- All creative phase documents

---
*This archive represents the complete documentation of the project lifecycle.*
",
        archived = iso_timestamp(archived),
        summary = parts.summary,
        plan = parts.plan,
        progress = parts.progress,
        reflection = parts.reflection,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn iso_timestamp_has_millis_and_z() {
        assert_eq!(iso_timestamp(&ts()), "2025-01-02T03:04:05.000Z");
    }

    #[test]
    fn active_context_level_one() {
        assert_eq!(
            active_context("Fix crash on save", ComplexityLevel::One),
            "# Active Context

## Current Task
Fix crash on save

## Complexity Level: 1
Quick bug fix - Direct implementation, minimal planning required

## Current Mode: VAN
- Status: Completed
- Next Mode: IMPLEMENT
"
        );
    }

    #[test]
    fn active_context_levels_two_to_four_go_to_plan() {
        for level in [
            ComplexityLevel::Two,
            ComplexityLevel::Three,
            ComplexityLevel::Four,
        ] {
            assert!(active_context("t", level).contains("- Next Mode: PLAN\n"));
        }
    }

    #[test]
    fn active_context_reset_names_archive() {
        let text = active_context_reset("docs/archive/project-archive.md");
        assert!(text.contains("## Status: Ready for New Task"));
        assert!(text.ends_with("**Archive Location**: docs/archive/project-archive.md\n"));
    }

    #[test]
    fn plan_level_one() {
        assert_eq!(
            implementation_plan(ComplexityLevel::One, &ts()),
            "# Implementation Plan - Level 1 (Quick Fix)

## Overview
Quick bug fix implementation plan.

## Implementation Steps
1. Identify the bug location
2. Implement targeted fix
3. Test the fix
4. Verify no regression

## Files to Modify
*List files that need changes*

## Testing Strategy
*How to verify the fix works*

**Created**: 2025-01-02T03:04:05.000Z
"
        );
    }

    #[test]
    fn plan_level_two_is_enhancement() {
        let text = implementation_plan(ComplexityLevel::Two, &ts());
        assert!(text.starts_with("# Implementation Plan - Level 2 (Simple Enhancement)\n"));
        assert!(text.contains("## Potential Challenges"));
        assert!(!text.contains("## Creative Phase Components"));
    }

    #[test]
    fn plan_levels_three_and_four_share_complex_template() {
        let three = implementation_plan(ComplexityLevel::Three, &ts());
        let four = implementation_plan(ComplexityLevel::Four, &ts());
        assert!(three.starts_with("# Implementation Plan - Level 3 (Complex Feature)"));
        assert!(four.starts_with("# Implementation Plan - Level 4 (Complex Feature)"));
        for text in [&three, &four] {
            assert!(text.contains(
                "## Creative Phase Components
*Components requiring design decisions:*
- [ ] Architecture Design: *Component name*
- [ ] Algorithm Design: *Component name*
- [ ] UI/UX Design: *Component name*"
            ));
            assert!(text.contains("### Phase 1: Core Components"));
            assert!(text.contains("### Phase 2: Secondary Components"));
            assert!(text.contains("### Phase 3: Integration & Polish"));
        }
        assert_eq!(three.replacen("Level 3", "Level 4", 1), four);
    }

    #[test]
    fn creative_document_header_and_requirements() {
        let text = creative_document(
            "search-index",
            CreativeType::Algorithm,
            "Must handle 1M docs\nLatency < 50ms",
            &ts(),
        );
        assert!(text.starts_with("# 🎨🎨🎨 ENTERING CREATIVE PHASE: ALGORITHM\n"));
        assert!(text.contains("## Component: search-index\n**Type**: algorithm\n"));
        assert!(text.contains(
            "## Requirements & Constraints\nMust handle 1M docs\nLatency < 50ms\n"
        ));
        assert!(text.contains("### Option 1: [Name]"));
        assert!(text.contains("### Option 2: [Name]"));
        assert!(text.contains("## Recommended Approach\n*Selection with justification*"));
        assert!(text.ends_with("# 🎨🎨🎨 EXITING CREATIVE PHASE\n"));
    }

    #[test]
    fn creative_uiux_banner() {
        let text = creative_document("nav", CreativeType::UiUx, "r", &ts());
        assert!(text.starts_with("# 🎨🎨🎨 ENTERING CREATIVE PHASE: UIUX\n"));
    }

    #[test]
    fn build_steps_variants() {
        let one = build_steps(ComplexityLevel::One, Some("ignored"));
        assert!(one.starts_with("### Level 1 Build Process:\n1. 🔍 Review bug report"));
        assert!(!one.contains("ignored"));

        let two = build_steps(ComplexityLevel::Two, None);
        assert!(two.starts_with("### Level 2 Build Process:\n1. 📋 Follow build plan"));

        let four = build_steps(ComplexityLevel::Four, Some("Phase 2: API"));
        assert!(four.starts_with("### Level 4 Build Process:\n**Phase**: Phase 2: API\n\n"));
        assert!(four.ends_with("6. 🔍 Comprehensive review"));

        let three = build_steps(ComplexityLevel::Three, None);
        assert!(three.contains("**Phase**: Core Implementation\n"));
    }

    #[test]
    fn progress_document_layout() {
        let steps = build_steps(ComplexityLevel::Two, None);
        let text = progress_document("Main Implementation", ComplexityLevel::Two, &steps, &ts());
        assert!(text.starts_with(
            "# Implementation Progress

## Phase: Main Implementation
**Complexity Level**: 2
**Started**: 2025-01-02T03:04:05.000Z

## Build Steps
### Level 2 Build Process:"
        ));
        assert!(text.contains(
            "## Status
- [ ] Core implementation
- [ ] Testing
- [ ] Integration
- [ ] Documentation
"
        ));
    }

    #[test]
    fn reflection_sections() {
        let text = reflection_document(&ts());
        for heading in [
            "### What Went Well (Successes)",
            "### Challenges Encountered",
            "### Lessons Learned",
            "### Process Improvements",
            "### Technical Improvements",
            "## Comparison to Plan",
            "## Final Status",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("**Completed**: 2025-01-02T03:04:05.000Z"));
    }

    #[test]
    fn archive_embeds_parts_verbatim() {
        let parts = ArchiveParts {
            summary: "## Project Overview\n- **Task**: t\n",
            plan: "PLAN BODY",
            progress: "PROGRESS BODY",
            reflection: "",
        };
        let text = archive_document(&parts, &ts());
        assert!(text.starts_with("# Project Archive\n\n**Archived**: 2025-01-02T03:04:05.000Z\n"));
        assert!(text.contains(
            "## Project Summary\n## Project Overview\n- **Task**: t\n\n\n## Implementation Plan\nPLAN BODY\n\n## Implementation Progress\nPROGRESS BODY\n\n## Reflection\n\n\n## Final Status\n"
        ));
    }
}
