use serde::{Deserialize, Serialize};

use crate::model::{ChoiceId, QuestionId, SectionId, SubSection, SubSectionId};

/// A single assessment question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub sub_section_id: SubSectionId,
}

/// One selectable choice on a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    pub question_id: QuestionId,
    #[serde(default)]
    pub is_correct: u8,
}

/// A question joined with its choices, in API return order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}

/// A sub-section heading with its ordered questions.
///
/// A sub-section with zero matching questions still appears with an empty
/// question list; the view decides how to render that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSectionGroup {
    pub sub_section: SubSection,
    pub questions: Vec<QuestionWithChoices>,
}

impl SubSectionGroup {
    /// Ids of every question in this group, in display order.
    #[must_use]
    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.question.id).collect()
    }
}

/// Joins independently fetched reference collections for one target section.
///
/// Sub-sections are filtered by `section_id`, questions by the surviving
/// sub-section ids, and choices attached per question. Input order is
/// preserved throughout; no sorting happens here. Empty inputs yield an
/// empty result rather than an error, since the three fetches race
/// independently and any one can come back empty.
#[must_use]
pub fn group_for_section(
    section_id: SectionId,
    sub_sections: &[SubSection],
    questions: &[Question],
    choices: &[Choice],
) -> Vec<SubSectionGroup> {
    sub_sections
        .iter()
        .filter(|sub| sub.section_id == section_id)
        .map(|sub| {
            let questions = questions
                .iter()
                .filter(|q| q.sub_section_id == sub.id)
                .map(|q| QuestionWithChoices {
                    question: q.clone(),
                    choices: choices
                        .iter()
                        .filter(|c| c.question_id == q.id)
                        .cloned()
                        .collect(),
                })
                .collect();
            SubSectionGroup {
                sub_section: sub.clone(),
                questions,
            }
        })
        .collect()
}

/// Ids of every question across all groups, in display order.
#[must_use]
pub fn all_question_ids(groups: &[SubSectionGroup]) -> Vec<QuestionId> {
    groups.iter().flat_map(SubSectionGroup::question_ids).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: u64, section: u64) -> SubSection {
        SubSection {
            id: SubSectionId::new(id),
            title: format!("Sub {id}"),
            section_id: SectionId::new(section),
        }
    }

    fn question(id: u64, sub_section: u64) -> Question {
        Question {
            id: QuestionId::new(id),
            text: format!("Q{id}"),
            sub_section_id: SubSectionId::new(sub_section),
        }
    }

    fn choice(id: u64, question: u64) -> Choice {
        Choice {
            id: ChoiceId::new(id),
            text: format!("C{id}"),
            question_id: QuestionId::new(question),
            is_correct: 0,
        }
    }

    #[test]
    fn groups_exactly_the_target_section() {
        let subs = vec![sub(10, 1), sub(11, 1), sub(20, 2)];
        let questions = vec![question(100, 10), question(101, 11), question(200, 20)];
        let choices = vec![choice(1000, 100), choice(1001, 100), choice(2000, 200)];

        let groups = group_for_section(SectionId::new(1), &subs, &questions, &choices);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].sub_section.id, SubSectionId::new(10));
        assert_eq!(groups[1].sub_section.id, SubSectionId::new(11));
        assert_eq!(groups[0].questions.len(), 1);
        assert_eq!(groups[0].questions[0].choices.len(), 2);
        // Nothing from section 2 leaks in.
        assert!(
            all_question_ids(&groups)
                .iter()
                .all(|id| *id != QuestionId::new(200))
        );
    }

    #[test]
    fn empty_sub_section_still_appears() {
        let subs = vec![sub(10, 1)];
        let groups = group_for_section(SectionId::new(1), &subs, &[], &[]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].questions.is_empty());
    }

    #[test]
    fn empty_inputs_degrade_to_empty_result() {
        let groups = group_for_section(SectionId::new(1), &[], &[], &[]);
        assert!(groups.is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let subs = vec![sub(11, 1), sub(10, 1)];
        let questions = vec![question(101, 10), question(100, 10)];
        let groups = group_for_section(SectionId::new(1), &subs, &questions, &[]);
        assert_eq!(groups[0].sub_section.id, SubSectionId::new(11));
        let ids = groups[1].question_ids();
        assert_eq!(ids, vec![QuestionId::new(101), QuestionId::new(100)]);
    }
}
