use dioxus::prelude::*;
use dioxus_router::Link;

use assess_core::model::UserId;
use services::ResultsOverview;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, use_session, view_state_from_resource};
use crate::vm::{map_averages, map_section_gauges};

/// The signed-in user's own final results.
#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results();
    let session_signal = use_session();
    let session = session_signal();

    let user = session.as_ref().map(|s| s.user_id);
    let resource = use_resource(move || {
        let results = results.clone();
        async move {
            match user {
                Some(user) => Ok::<_, ViewError>(results.final_overview(user).await),
                None => Ok(ResultsOverview {
                    sections: Vec::new(),
                    averages: Vec::new(),
                }),
            }
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "My results" }
            if session.is_none() {
                p { "Sign in to see your results." }
            } else {
                OverviewBody { state }
                Link { to: Route::Tips {}, "See your improvement tips" }
            }
        }
    }
}

/// A manager's evaluation results for one employee.
#[component]
pub fn ManagerResultsView(employee_id: UserId) -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results();

    let resource = use_resource(move || {
        let results = results.clone();
        async move { Ok::<_, ViewError>(results.manager_overview(employee_id).await) }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Evaluation results" }
            OverviewBody { state }
            Link { to: Route::Employees {}, "Back to employees" }
        }
    }
}

/// The combined final results for one employee, for their manager.
#[component]
pub fn FinalResultsView(employee_id: UserId) -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results();

    let resource = use_resource(move || {
        let results = results.clone();
        async move { Ok::<_, ViewError>(results.final_overview(employee_id).await) }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Final results" }
            OverviewBody { state }
            Link { to: Route::Employees {}, "Back to employees" }
        }
    }
}

#[component]
fn OverviewBody(state: ViewState<ResultsOverview>) -> Element {
    match state {
        ViewState::Idle => rsx! {
            p { "Idle" }
        },
        ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Ready(overview) => rsx! {
            if overview.is_empty() {
                p { "No results yet." }
            } else {
                for section in overview.sections {
                    section { class: "result-section",
                        h3 { "{section.title}" }
                        div { class: "gauges",
                            for gauge in map_section_gauges(&section) {
                                div { class: "gauge", style: "border-color: {gauge.color}",
                                    span { class: "gauge-title", "{gauge.title}" }
                                    span { class: "gauge-percent", style: "color: {gauge.color}",
                                        "{gauge.percent_str}"
                                    }
                                    span { class: "gauge-points", "{gauge.points} points" }
                                }
                            }
                        }
                    }
                }
                section { class: "averages",
                    h3 { "Section averages" }
                    for avg in map_averages(&overview.averages) {
                        div { class: "average-row",
                            span { class: "average-title", "{avg.title}" }
                            div { class: "average-bar",
                                div {
                                    class: "average-fill",
                                    style: "width: {avg.width_pct}%",
                                }
                            }
                            span { class: "average-percent", "{avg.percent_str}" }
                        }
                    }
                }
            }
        },
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
        },
    }
}
