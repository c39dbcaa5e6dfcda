use dioxus::prelude::*;
use dioxus_router::Link;

use services::api::{Category, Course};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, use_session, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    popular: Vec<Course>,
    categories: Vec<Category>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let session = use_session();
    let today = ctx.clock().now().format("%-d %B %Y");

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let popular = catalog.popular_courses().await.map_err(ViewError::from)?;
            let categories = catalog.categories().await.map_err(ViewError::from)?;
            Ok(HomeData { popular, categories })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Home" }
            p { class: "session-banner", "{today}" }

            if let Some(session) = session() {
                p { class: "session-banner",
                    "Signed in as user {session.user_id}"
                    if session.assessment_completed {
                        " (self-assessment complete)"
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    section {
                        h3 { "Popular courses" }
                        if data.popular.is_empty() {
                            p { "No courses yet." }
                        } else {
                            ul { class: "course-list",
                                for course in data.popular {
                                    li { key: "{course.id}", "{course.title}" }
                                }
                            }
                        }
                    }
                    section {
                        h3 { "Categories" }
                        ul { class: "category-list",
                            for category in data.categories {
                                li { "{category.name}" }
                            }
                        }
                        Link { to: Route::Courses {}, "Browse all courses" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
