use serde::{Deserialize, Serialize};

use crate::model::{SectionId, SubSectionId};

/// Top-level grouping of assessment content (a competency area).
///
/// The flag fields arrive from the API as 0/1 integers; visibility rules are
/// applied client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    /// Section is shown only to users with a manager role.
    #[serde(default, rename = "ismanager")]
    pub is_manager_section: u8,
    /// Section belongs to the manager-evaluates-employee flow.
    #[serde(default, rename = "for_manager_to_evaluate_employee")]
    pub for_manager_evaluation: u8,
}

impl Section {
    #[must_use]
    pub fn new(id: SectionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            is_manager_section: 0,
            for_manager_evaluation: 0,
        }
    }

    /// Marks this section as manager-only.
    #[must_use]
    pub fn manager_only(mut self) -> Self {
        self.is_manager_section = 1;
        self
    }

    /// Marks this section as part of the manager-evaluation flow.
    #[must_use]
    pub fn for_manager_evaluation(mut self) -> Self {
        self.is_manager_section = 1;
        self.for_manager_evaluation = 1;
        self
    }

    /// Whether this section appears in the self-assessment flow for the
    /// given manager-role flag.
    ///
    /// Manager-evaluation sections never appear in self-assessment; sections
    /// flagged manager-only appear only for users holding a manager role.
    #[must_use]
    pub fn visible_in_self_assessment(&self, user_is_manager: bool) -> bool {
        if self.for_manager_evaluation == 1 {
            return false;
        }
        if self.is_manager_section == 1 {
            return user_is_manager;
        }
        true
    }

    /// Whether this section belongs to the manager-evaluation flow.
    #[must_use]
    pub fn visible_in_manager_evaluation(&self) -> bool {
        self.for_manager_evaluation == 1
    }
}

/// A grouping of questions within a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSection {
    pub id: SubSectionId,
    pub title: String,
    pub section_id: SectionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_evaluation_sections_hidden_from_self_assessment() {
        let section = Section::new(SectionId::new(1), "Evaluation").for_manager_evaluation();
        assert!(!section.visible_in_self_assessment(true));
        assert!(!section.visible_in_self_assessment(false));
        assert!(section.visible_in_manager_evaluation());
    }

    #[test]
    fn manager_only_sections_require_manager_role() {
        let section = Section::new(SectionId::new(2), "Leadership").manager_only();
        assert!(section.visible_in_self_assessment(true));
        assert!(!section.visible_in_self_assessment(false));
        assert!(!section.visible_in_manager_evaluation());
    }

    #[test]
    fn plain_sections_visible_to_everyone() {
        let section = Section::new(SectionId::new(3), "Basics");
        assert!(section.visible_in_self_assessment(false));
    }
}
