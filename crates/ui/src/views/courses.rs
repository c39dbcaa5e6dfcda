use std::time::Duration;

use dioxus::prelude::*;

use services::CourseQuery;
use services::api::CoursePage;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Pause after the last keystroke before the search request fires.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let filter_catalog = ctx.catalog();

    let mut category = use_signal(|| None::<String>);
    let mut sub_category = use_signal(|| None::<String>);
    let mut search = use_signal(String::new);
    let mut page = use_signal(|| 1u32);

    // Filter options; sub-categories depend on the picked main category.
    let filters = use_resource(move || {
        let catalog = filter_catalog.clone();
        let category = category();
        async move {
            let mains = catalog.main_categories().await.map_err(ViewError::from)?;
            let subs = match &category {
                Some(name) => catalog.sub_categories(name).await.map_err(ViewError::from)?,
                None => Vec::new(),
            };
            Ok((mains, subs))
        }
    });

    let results = use_resource(move || {
        let catalog = catalog.clone();
        let query = CourseQuery {
            category: category(),
            sub_category: sub_category(),
            search: Some(search()).filter(|s| !s.is_empty()),
            page: page(),
            ..CourseQuery::first_page()
        };
        async move {
            // Restarting the resource on each keystroke debounces the search.
            if query.search.is_some() {
                tokio::time::sleep(SEARCH_DEBOUNCE).await;
            }
            catalog.search(&query).await.map_err(ViewError::from)
        }
    });

    let filter_state = view_state_from_resource(filters);
    let result_state = view_state_from_resource(results);

    rsx! {
        div { class: "page",
            h2 { "Courses" }

            div { class: "course-filters",
                if let ViewState::Ready((mains, subs)) = filter_state {
                    select {
                        onchange: move |event| {
                            let value = event.value();
                            category.set(Some(value).filter(|v| !v.is_empty()));
                            sub_category.set(None);
                            page.set(1);
                        },
                        option { value: "", "All categories" }
                        for main in mains {
                            option { value: "{main}", "{main}" }
                        }
                    }
                    select {
                        onchange: move |event| {
                            let value = event.value();
                            sub_category.set(Some(value).filter(|v| !v.is_empty()));
                            page.set(1);
                        },
                        option { value: "", "All sub-categories" }
                        for sub in subs {
                            option { value: "{sub}", "{sub}" }
                        }
                    }
                }
                input {
                    r#type: "search",
                    placeholder: "Search courses",
                    value: "{search}",
                    oninput: move |event| {
                        search.set(event.value());
                        page.set(1);
                    },
                }
            }

            match result_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(page_data) => rsx! {
                    CourseResults { page_data, page, }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn CourseResults(page_data: CoursePage, page: Signal<u32>) -> Element {
    let current = page();
    let last = page_data.total_pages.max(1);

    rsx! {
        if page_data.courses.is_empty() {
            p { "No courses match your filters." }
        } else {
            p { class: "course-total", "{page_data.total_courses} courses found" }
            ul { class: "course-list",
                for course in page_data.courses {
                    li { key: "{course.id}",
                        span { class: "course-title", "{course.title}" }
                        span { class: "course-meta", "{course.city} | {course.duration}" }
                    }
                }
            }
            div { class: "pagination",
                button {
                    disabled: current <= 1,
                    onclick: move |_| page.set(current.saturating_sub(1).max(1)),
                    "Previous"
                }
                span { "Page {current} of {last}" }
                button {
                    disabled: current >= last,
                    onclick: move |_| page.set((current + 1).min(last)),
                    "Next"
                }
            }
        }
    }
}
