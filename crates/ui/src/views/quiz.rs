use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use assess_core::flow::{QuizPlan, QuizStep, SectionSequencer};
use assess_core::model::{
    AnswerSheet, ChoiceId, EvaluationTarget, QuestionId, Section, UserId, UserProfile,
    UserSession, all_question_ids,
};
use services::{CompletionFlag, FlagUpdate, SubmissionError};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::use_session;

/// How long the terminal step spins before navigating to the results page.
const RESULTS_DELAY: Duration = Duration::from_secs(6);

/// The self-assessment flow: basic info, one screen per visible section,
/// then the loading step that hands over to the results page.
#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let session_signal = use_session();
    let session = session_signal();
    let quiz = ctx.quiz();

    let is_manager = session.as_ref().is_some_and(UserSession::is_manager);
    let progress_step = session.as_ref().map_or(30, UserSession::progress_step);
    let plan_res = use_resource(move || {
        let quiz = quiz.clone();
        async move { quiz.self_assessment_plan(is_manager).await }
    });

    let mut sequencer = use_signal(|| None::<SectionSequencer>);
    use_effect(move || {
        if let Some(plan) = plan_res() {
            if sequencer.peek().is_none() {
                sequencer.set(Some(SectionSequencer::new(plan.len(), progress_step)));
            }
        }
    });

    // An assessment already finished when the view opens goes straight to
    // the results page. Completing it mid-flow keeps the loading step.
    let navigator = use_navigator();
    let completed = use_hook(|| {
        session_signal
            .peek()
            .as_ref()
            .is_some_and(|s| s.assessment_completed)
    });
    use_effect(move || {
        if completed {
            navigator.push(Route::Results {});
        }
    });

    use_effect(move || {
        // Each step change starts at the top of the page.
        let _ = sequencer.read().as_ref().map(SectionSequencer::index);
        let _ = eval("window.scrollTo(0, 0);");
    });

    if completed {
        return rsx! {
            div { class: "page",
                h2 { "Self-assessment" }
                p { "You have already completed your assessment." }
            }
        };
    }

    let Some(session) = session else {
        return rsx! {
            div { class: "page",
                h2 { "Self-assessment" }
                p { "Sign in to start your assessment." }
            }
        };
    };

    let (Some(plan), Some(seq)) = (plan_res(), sequencer()) else {
        return rsx! {
            div { class: "page",
                h2 { "Self-assessment" }
                p { "Loading..." }
            }
        };
    };

    let user = session.user_id;
    let step = plan.step(seq.index()).cloned();
    let last_question_index = last_question_step(&plan);
    let is_final_section = Some(seq.index()) == last_question_index;
    let sessions = ctx.sessions();
    let advance_section = move |()| {
        if is_final_section {
            // Mirror the server-side flag locally so the next visit
            // short-circuits to results.
            let sessions = sessions.clone();
            spawn(async move {
                if let Err(error) = sessions.update(|s| s.assessment_completed = true).await {
                    warn!(%error, "could not record completion locally");
                }
            });
        }
        sequencer.with_mut(|s| {
            if let Some(s) = s {
                s.advance();
            }
        });
    };

    rsx! {
        div { class: "page quiz",
            h2 { "Self-assessment" }
            ProgressBar { percent: seq.progress() }
            StepList { plan: plan.clone(), current: seq.index() }

            match step {
                Some(QuizStep::BasicInfo) => rsx! {
                    BasicInfoStep {
                        user,
                        on_done: move |()| {
                            sequencer.with_mut(|s| {
                                if let Some(s) = s {
                                    s.advance();
                                }
                            });
                        },
                    }
                },
                Some(QuizStep::Questions(section)) => rsx! {
                    QuestionStep {
                        key: "{section.id}",
                        section: section.clone(),
                        submitter: user,
                        target_user_id: None,
                        completion_flag: is_final_section
                            .then_some(CompletionFlag::SelfAssessment),
                        allow_retreat: !seq.is_first(),
                        on_advance: advance_section,
                        on_retreat: move |()| {
                            sequencer.with_mut(|s| {
                                if let Some(s) = s {
                                    s.retreat();
                                }
                            });
                        },
                    }
                },
                Some(QuizStep::LoadingResults) => rsx! {
                    LoadingStep { destination: Route::Results {} }
                },
                None => rsx! {
                    p { "Nothing to show." }
                },
            }
        }
    }
}

/// Index of the final question step in a plan, if it has one.
pub(super) fn last_question_step(plan: &QuizPlan) -> Option<usize> {
    plan.steps()
        .iter()
        .rposition(|step| matches!(step, QuizStep::Questions(_)))
}

#[component]
pub(super) fn ProgressBar(percent: u8) -> Element {
    rsx! {
        div { class: "progress",
            div { class: "progress-fill", style: "width: {percent}%" }
            span { class: "progress-label", "{percent}%" }
        }
    }
}

#[component]
pub(super) fn StepList(plan: QuizPlan, current: usize) -> Element {
    rsx! {
        ol { class: "steps",
            for (index, step) in plan.steps().iter().enumerate() {
                li {
                    class: if index == current { "step active" } else { "step" },
                    "{step.title()}"
                }
            }
        }
    }
}

#[component]
pub(super) fn BasicInfoStep(user: UserId, on_done: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let registration = ctx.registration();
    let submit_registration = ctx.registration();

    let registered = use_resource(move || {
        let registration = registration.clone();
        async move { registration.is_registered(user).await.unwrap_or(false) }
    });

    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut mobile_number = use_signal(String::new);
    let mut current_position = use_signal(String::new);
    let mut years_in_same_position = use_signal(|| 0u32);
    let mut years_in_organization = use_signal(|| 0u32);
    let mut previous_position = use_signal(String::new);
    let mut studying_same_as_work = use_signal(|| false);
    let mut error = use_signal(|| None::<&'static str>);

    if registered() == Some(true) {
        // Returning users skip the form.
        return rsx! {
            div { class: "basic-info",
                p { "Your basic information is already on file." }
                button { onclick: move |_| on_done.call(()), "Continue" }
            }
        };
    }

    let submit = move |_| {
        if full_name().trim().is_empty() || email().trim().is_empty() {
            error.set(Some("Name and email are required."));
            return;
        }
        let profile = UserProfile {
            user_id: user,
            full_name: full_name(),
            email: email(),
            mobile_number: mobile_number(),
            current_position: current_position(),
            years_in_same_position: years_in_same_position(),
            years_in_organization: years_in_organization(),
            previous_position: previous_position(),
            studying_same_as_work: studying_same_as_work(),
        };
        let registration = submit_registration.clone();
        spawn(async move {
            match registration.register(&profile).await {
                Ok(()) => on_done.call(()),
                Err(_) => error.set(Some("Could not save your information. Please try again.")),
            }
        });
    };

    rsx! {
        div { class: "basic-info",
            h3 { "Basic information" }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
            label { "Full name"
                input { value: "{full_name}", oninput: move |e| full_name.set(e.value()) }
            }
            label { "Email"
                input { value: "{email}", oninput: move |e| email.set(e.value()) }
            }
            label { "Mobile number"
                input { value: "{mobile_number}", oninput: move |e| mobile_number.set(e.value()) }
            }
            label { "Current position"
                input {
                    value: "{current_position}",
                    oninput: move |e| current_position.set(e.value()),
                }
            }
            label { "Years in the same position"
                input {
                    r#type: "number",
                    value: "{years_in_same_position}",
                    oninput: move |e| {
                        years_in_same_position.set(e.value().parse().unwrap_or(0));
                    },
                }
            }
            label { "Years in the organization"
                input {
                    r#type: "number",
                    value: "{years_in_organization}",
                    oninput: move |e| {
                        years_in_organization.set(e.value().parse().unwrap_or(0));
                    },
                }
            }
            label { "Previous position"
                input {
                    value: "{previous_position}",
                    oninput: move |e| previous_position.set(e.value()),
                }
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: studying_same_as_work(),
                    onchange: move |e| studying_same_as_work.set(e.checked()),
                }
                "My studies match my current work"
            }
            button { onclick: submit, "Next" }
        }
    }
}

#[component]
pub(super) fn QuestionStep(
    section: Section,
    submitter: UserId,
    target_user_id: Option<UserId>,
    completion_flag: Option<CompletionFlag>,
    allow_retreat: bool,
    on_advance: EventHandler<()>,
    on_retreat: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let submission = ctx.submission();

    let section_id = section.id;
    let groups = use_resource(move || {
        let quiz = quiz.clone();
        async move { quiz.section_questions(section_id).await }
    });

    let mut sheet = use_signal(AnswerSheet::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let Some(groups_data) = groups() else {
        return rsx! {
            p { "Loading..." }
        };
    };

    let question_ids = all_question_ids(&groups_data);
    let submit = {
        let question_ids = question_ids.clone();
        move |_| {
            if busy() {
                return;
            }
            let submission = submission.clone();
            let question_ids = question_ids.clone();
            let current = sheet();
            let target = match target_user_id {
                Some(employee) => EvaluationTarget::Employee(employee),
                None => EvaluationTarget::SelfAssessment,
            };
            busy.set(true);
            spawn(async move {
                let outcome = submission
                    .submit(&current, &question_ids, submitter, target, completion_flag)
                    .await;
                busy.set(false);
                match outcome {
                    Ok(report) if report.is_complete_success() => {
                        error.set(None);
                        on_advance.call(());
                    }
                    Ok(report) => {
                        let failed = report.failed.len();
                        let flag_note = match report.flag_update {
                            FlagUpdate::Failed(_) => " Your completion status was not updated.",
                            _ => "",
                        };
                        error.set(Some(format!(
                            "{failed} answer(s) could not be saved.{flag_note} Please try again."
                        )));
                    }
                    Err(SubmissionError::Incomplete { unanswered }) => {
                        error.set(Some(format!(
                            "Please answer all questions before continuing ({} left).",
                            unanswered.len()
                        )));
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "question-step",
            h3 { "{section.title}" }

            if groups_data.is_empty() {
                p { "There are no questions in this section." }
            } else {
                for group in &groups_data {
                    section { class: "sub-section",
                        h4 { "{group.sub_section.title}" }
                        if group.questions.is_empty() {
                            p { class: "muted", "No questions in this part." }
                        }
                        for item in &group.questions {
                            QuestionCard {
                                key: "{item.question.id}",
                                question_id: item.question.id,
                                text: item.question.text.clone(),
                                choices: item
                                    .choices
                                    .iter()
                                    .map(|c| (c.id, c.text.clone()))
                                    .collect::<Vec<_>>(),
                                selected: sheet().selected(item.question.id),
                                on_select: move |(question, choice)| {
                                    sheet.with_mut(|s| s.select(question, choice));
                                },
                            }
                        }
                    }
                }
            }

            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }

            div { class: "step-nav",
                if allow_retreat {
                    button {
                        disabled: busy(),
                        onclick: move |_| on_retreat.call(()),
                        "Previous"
                    }
                }
                button { disabled: busy(), onclick: submit,
                    if busy() { "Saving..." } else { "Next" }
                }
            }
        }
    }
}

#[component]
fn QuestionCard(
    question_id: QuestionId,
    text: String,
    choices: Vec<(ChoiceId, String)>,
    selected: Option<ChoiceId>,
    on_select: EventHandler<(QuestionId, ChoiceId)>,
) -> Element {
    rsx! {
        div { class: "question",
            p { class: "question-text", "{text}" }
            for (choice_id, choice_text) in choices {
                label { class: "choice",
                    input {
                        r#type: "radio",
                        name: "question-{question_id}",
                        checked: selected == Some(choice_id),
                        onchange: move |_| on_select.call((question_id, choice_id)),
                    }
                    "{choice_text}"
                }
            }
        }
    }
}

#[component]
pub(super) fn LoadingStep(destination: Route) -> Element {
    let navigator = use_navigator();

    use_future(move || {
        let destination = destination.clone();
        async move {
            tokio::time::sleep(RESULTS_DELAY).await;
            navigator.push(destination);
        }
    });

    rsx! {
        div { class: "loading-results",
            div { class: "spinner" }
            p { "Preparing your results..." }
        }
    }
}
