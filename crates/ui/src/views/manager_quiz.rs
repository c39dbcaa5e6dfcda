use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use assess_core::flow::{QuizStep, SectionSequencer};
use assess_core::model::{UserId, UserSession};
use services::CompletionFlag;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::quiz::{LoadingStep, ProgressBar, QuestionStep, StepList, last_question_step};
use crate::views::use_session;

/// The manager-evaluation flow for one employee. Unlike the self flow there
/// is no basic-info step and no way back to a submitted section.
#[component]
pub fn ManagerQuizView(employee_id: UserId) -> Element {
    let ctx = use_context::<AppContext>();
    let session_signal = use_session();
    let session = session_signal();
    let quiz = ctx.quiz();
    let selection_sessions = ctx.sessions();

    let progress_step = session.as_ref().map_or(30, UserSession::progress_step);
    let plan_res = use_resource(move || {
        let quiz = quiz.clone();
        async move { quiz.manager_evaluation_plan().await }
    });

    let mut sequencer = use_signal(|| None::<SectionSequencer>);
    use_effect(move || {
        if let Some(plan) = plan_res() {
            if sequencer.peek().is_none() {
                sequencer.set(Some(SectionSequencer::new(plan.len(), progress_step)));
            }
        }
    });

    let employee = use_resource(move || {
        let sessions = selection_sessions.clone();
        async move {
            sessions
                .selected_employee()
                .await
                .ok()
                .flatten()
                .filter(|row| row.id == employee_id)
        }
    });

    // An employee already evaluated goes straight to their results page.
    let navigator = use_navigator();
    let already_done = employee()
        .flatten()
        .is_some_and(|row| row.manager_assessment_done);
    use_effect(move || {
        if already_done {
            navigator.push(Route::ManagerResults { employee_id });
        }
    });

    use_effect(move || {
        // Each step change starts at the top of the page.
        let _ = sequencer.read().as_ref().map(SectionSequencer::index);
        let _ = eval("window.scrollTo(0, 0);");
    });

    let Some(session) = session else {
        return rsx! {
            div { class: "page",
                h2 { "Employee evaluation" }
                p { "Sign in to evaluate your employees." }
            }
        };
    };
    if !session.is_manager() {
        return rsx! {
            div { class: "page",
                h2 { "Employee evaluation" }
                p { "Only managers can evaluate employees." }
            }
        };
    }
    if already_done {
        return rsx! {
            div { class: "page",
                h2 { "Employee evaluation" }
                p { "This employee has already been evaluated." }
            }
        };
    }

    let (Some(plan), Some(seq)) = (plan_res(), sequencer()) else {
        return rsx! {
            div { class: "page",
                h2 { "Employee evaluation" }
                p { "Loading..." }
            }
        };
    };

    let manager = session.user_id;
    let step = plan.step(seq.index()).cloned();
    let last_question_index = last_question_step(&plan);
    let is_final_section = Some(seq.index()) == last_question_index;
    let sessions = ctx.sessions();
    let advance_section = move |()| {
        if is_final_section {
            // Keep the stored selection in step with the flag written on
            // the server.
            let sessions = sessions.clone();
            spawn(async move {
                if let Err(error) = sessions.mark_employee_evaluated(employee_id).await {
                    warn!(%error, "could not record evaluation locally");
                }
            });
        }
        sequencer.with_mut(|s| {
            if let Some(s) = s {
                s.advance();
            }
        });
    };
    let subject = employee()
        .flatten()
        .map_or_else(|| format!("employee {employee_id}"), |row| row.name);

    rsx! {
        div { class: "page quiz",
            h2 { "Evaluating {subject}" }
            ProgressBar { percent: seq.progress() }
            StepList { plan: plan.clone(), current: seq.index() }

            if last_question_index.is_none() {
                p { "There are no evaluation sections to fill in right now." }
            } else {
                match step {
                    Some(QuizStep::Questions(section)) => rsx! {
                        QuestionStep {
                            key: "{section.id}",
                            section: section.clone(),
                            submitter: manager,
                            target_user_id: Some(employee_id),
                            completion_flag: is_final_section
                                .then_some(CompletionFlag::ManagerAssessment),
                            // Submitted sections cannot be revisited in this flow.
                            allow_retreat: false,
                            on_advance: advance_section,
                            on_retreat: move |()| {},
                        }
                    },
                    Some(QuizStep::LoadingResults) => rsx! {
                        LoadingStep {
                            destination: Route::ManagerResults { employee_id },
                        }
                    },
                    Some(QuizStep::BasicInfo) | None => rsx! {
                        p { "Nothing to show." }
                    },
                }
            }
        }
    }
}
