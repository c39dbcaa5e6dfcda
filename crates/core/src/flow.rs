//! Quiz flow plans and the section sequencer.
//!
//! A flow is a fixed, linear list of steps built once from the fetched
//! sections; the sequencer walks it one step at a time and tracks the
//! progress bar. There is no skip-ahead and no persistence: state resets to
//! the initial step on remount.

use crate::model::{Section, SectionId};

/// Progress-bar value every flow starts from.
pub const INITIAL_PROGRESS: u8 = 8;

/// One screen in a quiz flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// Fixed personal-data step at the start of the self-assessment flow.
    BasicInfo,
    /// One assessment section's question screen.
    Questions(Section),
    /// Terminal step that shows a spinner and then navigates to results.
    LoadingResults,
}

impl QuizStep {
    /// Display title for the step list / nav.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            QuizStep::BasicInfo => "Basic information",
            QuizStep::Questions(section) => &section.title,
            QuizStep::LoadingResults => "Assessment result",
        }
    }
}

/// An ordered quiz flow. Ordering is the API's section order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPlan {
    steps: Vec<QuizStep>,
}

impl QuizPlan {
    /// Builds the self-assessment flow: the fixed basic-info step, one step
    /// per section visible to this user, and the terminal results step.
    #[must_use]
    pub fn self_assessment(sections: &[Section], user_is_manager: bool) -> Self {
        let mut steps = vec![QuizStep::BasicInfo];
        steps.extend(
            sections
                .iter()
                .filter(|s| s.visible_in_self_assessment(user_is_manager))
                .cloned()
                .map(QuizStep::Questions),
        );
        steps.push(QuizStep::LoadingResults);
        Self { steps }
    }

    /// Builds the manager-evaluation flow: one step per manager-evaluation
    /// section and the terminal results step. No basic-info step.
    #[must_use]
    pub fn manager_evaluation(sections: &[Section]) -> Self {
        let mut steps: Vec<QuizStep> = sections
            .iter()
            .filter(|s| s.visible_in_manager_evaluation())
            .cloned()
            .map(QuizStep::Questions)
            .collect();
        steps.push(QuizStep::LoadingResults);
        Self { steps }
    }

    /// Placeholder flow used when the sections fetch fails, so the screen
    /// still renders something navigable.
    #[must_use]
    pub fn fallback_self_assessment() -> Self {
        let sections = vec![
            Section::new(SectionId::new(1), "Sample section 1"),
            Section::new(SectionId::new(2), "Sample section 2"),
        ];
        Self::self_assessment(&sections, false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&QuizStep> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn steps(&self) -> &[QuizStep] {
        &self.steps
    }
}

/// Tracks the active step and the completion progress percentage.
///
/// `advance` and `retreat` are clamped no-ops at the boundaries; they never
/// fail. The progress increment is fixed per flow (see
/// [`UserSession::progress_step`](crate::model::UserSession::progress_step)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSequencer {
    index: usize,
    last: usize,
    progress: u8,
    step: u8,
}

impl SectionSequencer {
    /// A sequencer over `step_count` steps with the given per-step progress
    /// increment. Starts at the first step with progress 8.
    #[must_use]
    pub fn new(step_count: usize, progress_step: u8) -> Self {
        Self {
            index: 0,
            last: step_count.saturating_sub(1),
            progress: INITIAL_PROGRESS,
            step: progress_step,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index == self.last
    }

    /// Moves forward one step, bumping progress (clamped at 100). No-op on
    /// the last step.
    pub fn advance(&mut self) {
        if self.index < self.last {
            self.index += 1;
            self.progress = self.progress.saturating_add(self.step).min(100);
        }
    }

    /// Moves back one step, lowering progress (clamped at 0). No-op on the
    /// first step.
    pub fn retreat(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.progress = self.progress.saturating_sub(self.step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: u64, title: &str) -> Section {
        Section::new(SectionId::new(id), title)
    }

    #[test]
    fn self_assessment_plan_wraps_sections_with_fixed_steps() {
        let sections = vec![
            section(1, "Skills"),
            section(2, "Evaluation").for_manager_evaluation(),
            section(3, "Leadership").manager_only(),
        ];

        let plan = QuizPlan::self_assessment(&sections, false);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.step(0), Some(&QuizStep::BasicInfo));
        assert_eq!(plan.step(1).unwrap().title(), "Skills");
        assert_eq!(plan.step(2), Some(&QuizStep::LoadingResults));

        let manager_plan = QuizPlan::self_assessment(&sections, true);
        assert_eq!(manager_plan.len(), 4);
        assert_eq!(manager_plan.step(2).unwrap().title(), "Leadership");
    }

    #[test]
    fn manager_plan_keeps_only_evaluation_sections() {
        let sections = vec![
            section(1, "Skills"),
            section(2, "Evaluation").for_manager_evaluation(),
        ];
        let plan = QuizPlan::manager_evaluation(&sections);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.step(0).unwrap().title(), "Evaluation");
        assert_eq!(plan.step(1), Some(&QuizStep::LoadingResults));
    }

    #[test]
    fn three_advances_with_step_thirty_reach_ninety_eight() {
        let mut seq = SectionSequencer::new(5, 30);
        assert_eq!(seq.progress(), 8);
        seq.advance();
        seq.advance();
        seq.advance();
        assert_eq!(seq.index(), 3);
        assert_eq!(seq.progress(), 98);
        seq.advance();
        // Clamped at 100 on the final transition.
        assert_eq!(seq.progress(), 100);
        assert!(seq.is_last());
        seq.advance();
        assert_eq!(seq.index(), 4);
        assert_eq!(seq.progress(), 100);
    }

    #[test]
    fn retreat_is_clamped_at_the_floor() {
        let mut seq = SectionSequencer::new(3, 30);
        seq.retreat();
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.progress(), 8);

        seq.advance();
        seq.retreat();
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.progress(), 8);

        // Progress never goes negative even if the floor was reached with a
        // partial increment.
        let mut low = SectionSequencer::new(3, 30);
        low.advance();
        low.retreat();
        low.retreat();
        assert_eq!(low.progress(), 8);
    }
}
