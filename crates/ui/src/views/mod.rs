mod courses;
mod employees;
mod home;
mod manager_quiz;
pub(crate) mod quiz;
mod results;
mod state;
mod tips;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use courses::CoursesView;
pub use employees::EmployeesView;
pub use home::HomeView;
pub use manager_quiz::ManagerQuizView;
pub use quiz::QuizView;
pub use results::{FinalResultsView, ManagerResultsView, ResultsView};
pub use state::{ViewError, ViewState, use_session, view_state_from_resource};
pub use tips::TipsView;
