use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, use_session, view_state_from_resource};

#[component]
pub fn TipsView() -> Element {
    let ctx = use_context::<AppContext>();
    let tips = ctx.tips();
    let results = ctx.results();
    let session_signal = use_session();
    let session = session_signal();

    let user = session.as_ref().map(|s| s.user_id);
    let resource = use_resource(move || {
        let tips = tips.clone();
        let results = results.clone();
        async move {
            match user {
                Some(user) => {
                    let overview = results.final_overview(user).await;
                    let rows: Vec<_> = overview
                        .sections
                        .iter()
                        .flat_map(|section| section.rows.iter().cloned())
                        .collect();
                    Ok::<_, ViewError>(tips.tips_for(user, &rows).await)
                }
                None => Ok(Vec::new()),
            }
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Improvement tips" }
            if session.is_none() {
                p { "Sign in to see your tips." }
            } else {
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Ready(lines) => rsx! {
                        if lines.is_empty() {
                            p { "No tips yet. Complete your assessment first." }
                        } else {
                            ul { class: "tips",
                                for line in lines {
                                    li { "{line}" }
                                }
                            }
                        }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                    },
                }
                Link { to: Route::Results {}, "Back to results" }
            }
        }
    }
}
