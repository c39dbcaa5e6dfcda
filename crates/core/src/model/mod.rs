mod answers;
mod ids;
mod question;
mod results;
mod section;
mod user;

pub use answers::{AnswerSheet, AnswerSubmission, EvaluationTarget};
pub use ids::{
    ChoiceId, OrganizationId, ParseIdError, QuestionId, SectionId, SubSectionId, UserId,
};
pub use question::{
    Choice, Question, QuestionWithChoices, SubSectionGroup, all_question_ids, group_for_section,
};
pub use results::{
    FAIL_COLOR, GaugeProps, PASS_COLOR, PASS_THRESHOLD, SectionAverage, SectionResults,
    SubsectionResult, compute_averages, gauge_props, group_by_section,
};
pub use section::{Section, SubSection};
pub use user::{EmployeeRecord, EmployeeRow, UserProfile, UserSession};
