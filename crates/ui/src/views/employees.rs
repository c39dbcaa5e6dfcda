use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tracing::warn;

use assess_core::model::EmployeeRow;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, use_session, view_state_from_resource};

#[component]
pub fn EmployeesView() -> Element {
    let ctx = use_context::<AppContext>();
    let roster = ctx.roster();
    let session_signal = use_session();
    let session = session_signal();

    // Hooks run unconditionally; the signed-out and non-manager cases are
    // handled in the render below.
    let manager = session.as_ref().filter(|s| s.is_manager()).cloned();
    let resource = use_resource(move || {
        let roster = roster.clone();
        let manager = manager.clone();
        async move {
            match manager {
                Some(session) => Ok::<_, ViewError>(
                    roster.employees(session.user_id, session.organization_id).await,
                ),
                None => Ok(Vec::new()),
            }
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Employees" }

            if session.is_none() {
                p { "Sign in to see your employees." }
            } else if !session.as_ref().is_some_and(|s| s.is_manager()) {
                p { "Only managers can view the employee roster." }
            } else {
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Ready(rows) => rsx! {
                        if rows.is_empty() {
                            p { "No employees found." }
                        } else {
                            table { class: "roster",
                                thead {
                                    tr {
                                        th { "#" }
                                        th { "Name" }
                                        th { "Self-assessment" }
                                        th { "Your evaluation" }
                                        th { "Actions" }
                                    }
                                }
                                tbody {
                                    for row in rows {
                                        EmployeeRowItem { row }
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
        }
    }
}

#[component]
fn EmployeeRowItem(row: EmployeeRow) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let self_state = if row.self_assessment_done { "Done" } else { "Pending" };
    let manager_state = if row.manager_assessment_done { "Done" } else { "Pending" };

    let evaluate = {
        let row = row.clone();
        move |_| {
            let sessions = ctx.sessions();
            let row = row.clone();
            // Remember the pick so the evaluation screen can show the name.
            spawn(async move {
                if let Err(error) = sessions.select_employee(&row).await {
                    warn!(%error, employee_id = %row.id, "could not store the selection");
                }
                navigator.push(Route::ManagerAssessment { employee_id: row.id });
            });
        }
    };

    rsx! {
        tr { key: "{row.id}",
            td { "{row.position}" }
            td { "{row.name}" }
            td { "{self_state}" }
            td { "{manager_state}" }
            td {
                button { class: "link-button", onclick: evaluate, "Evaluate" }
                " | "
                Link {
                    to: Route::ManagerResults { employee_id: row.id },
                    "Results"
                }
                if row.final_result_available() {
                    " | "
                    Link {
                        to: Route::FinalResults { employee_id: row.id },
                        "Final result"
                    }
                }
            }
        }
    }
}
