use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use assess_core::model::UserId;

use crate::views::{
    CoursesView, EmployeesView, FinalResultsView, HomeView, ManagerQuizView,
    ManagerResultsView, QuizView, ResultsView, TipsView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/courses", CoursesView)] Courses {},
        #[route("/assessment", QuizView)] Assessment {},
        #[route("/results", ResultsView)] Results {},
        #[route("/tips", TipsView)] Tips {},
        #[route("/employees", EmployeesView)] Employees {},
        #[route("/employees/:employee_id/assessment", ManagerQuizView)] ManagerAssessment { employee_id: UserId },
        #[route("/employees/:employee_id/results", ManagerResultsView)] ManagerResults { employee_id: UserId },
        #[route("/employees/:employee_id/final-results", FinalResultsView)] FinalResults { employee_id: UserId },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Assess" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Courses {}, "Courses" } }
                li { Link { to: Route::Assessment {}, "Self-assessment" } }
                li { Link { to: Route::Results {}, "My results" } }
                li { Link { to: Route::Employees {}, "Employees" } }
            }
        }
    }
}
