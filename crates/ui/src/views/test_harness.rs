use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use assess_core::model::{UserId, UserSession};
use assess_core::time::fixed_clock;
use services::{
    AppServices, CatalogService, FakeApi, QuizService, RegistrationService, ResultsService,
    RosterService, SessionStore, SubmissionWorkflow, TipsService,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    EmployeesView, FinalResultsView, HomeView, ManagerResultsView, ResultsView, TipsView,
};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn clock(&self) -> services::Clock {
        self.services.clock()
    }

    fn sessions(&self) -> SessionStore {
        self.services.sessions()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn submission(&self) -> Arc<SubmissionWorkflow> {
        self.services.submission()
    }

    fn results(&self) -> Arc<ResultsService> {
        self.services.results()
    }

    fn registration(&self) -> Arc<RegistrationService> {
        self.services.registration()
    }

    fn roster(&self) -> Arc<RosterService> {
        self.services.roster()
    }

    fn tips(&self) -> Arc<TipsService> {
        self.services.tips()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Employees,
    Results,
    ManagerResults(UserId),
    FinalResults(UserId),
    Tips,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Employees => rsx! { EmployeesView {} },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::ManagerResults(employee_id) => rsx! { ManagerResultsView { employee_id } },
        ViewKind::FinalResults(employee_id) => rsx! { FinalResultsView { employee_id } },
        ViewKind::Tips => rsx! { TipsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: FakeApi,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(
    view: ViewKind,
    api: FakeApi,
    session: Option<UserSession>,
) -> ViewHarness {
    let services = AppServices::new_in_memory(api.clone(), fixed_clock())
        .await
        .expect("assemble services");
    if let Some(session) = session {
        services
            .sessions()
            .sign_in(session)
            .await
            .expect("sign in");
    }

    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, api, services }
}
