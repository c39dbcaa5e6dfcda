use assess_core::model::{EmployeeRecord, OrganizationId, SubsectionResult, UserId, UserSession};
use services::FakeApi;
use services::api::Course;

use super::test_harness::{ViewKind, setup_view_harness};

fn manager_session() -> UserSession {
    UserSession::new(UserId::new(1), OrganizationId::new(1), 3)
}

fn employee_session() -> UserSession {
    UserSession::new(UserId::new(9), OrganizationId::new(1), 2)
}

fn result_row(sub: &str, correct: u32, total: u32) -> SubsectionResult {
    SubsectionResult {
        section_title: "Skills".into(),
        sub_section_title: sub.into(),
        correct_answers: correct,
        total_questions_answered: total,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_popular_courses() {
    let api = FakeApi::new();
    api.set_courses(vec![Course {
        id: 1,
        title: "Leading teams".into(),
        category: "Leadership".into(),
        sub_category: String::new(),
        city: "Helsinki".into(),
        duration: "2 days".into(),
    }]);

    let mut harness = setup_view_harness(ViewKind::Home, api, Some(employee_session())).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Leading teams"), "missing course in {html}");
    assert!(html.contains("Signed in as user 9"), "missing banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_observes_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Home, FakeApi::new(), None).await;
    harness.rebuild();
    harness.drive_async().await;
    assert!(!harness.render().contains("Signed in as user"));

    // A sign-in through the store reaches the already-rendered view.
    harness
        .services
        .sessions()
        .sign_in(employee_session())
        .await
        .expect("sign in");
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Signed in as user 9"), "missing banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn employees_view_smoke_renders_roster() {
    let api = FakeApi::new();
    api.set_roster(vec![
        EmployeeRecord {
            id: UserId::new(10),
            first_name: "Anna".into(),
            last_name: "Virtanen".into(),
            assessment_completed: 1,
            manager_assessment_completed: 1,
        },
        EmployeeRecord {
            id: UserId::new(11),
            first_name: "Ben".into(),
            last_name: "Korhonen".into(),
            assessment_completed: 0,
            manager_assessment_completed: 0,
        },
    ]);

    let mut harness = setup_view_harness(ViewKind::Employees, api, Some(manager_session())).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Anna Virtanen"), "missing employee in {html}");
    assert!(html.contains("Ben Korhonen"), "missing employee in {html}");
    // Both flags done: the final result link appears for Anna only.
    assert_eq!(html.matches("Final result").count(), 1, "in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn employees_view_smoke_guards_non_managers() {
    let harness_session = employee_session();
    let mut harness =
        setup_view_harness(ViewKind::Employees, FakeApi::new(), Some(harness_session)).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Only managers can view the employee roster."),
        "missing guard in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn final_results_view_smoke_renders_gauges() {
    let api = FakeApi::new();
    let employee = UserId::new(10);
    api.set_final_results(
        employee,
        vec![result_row("Planning", 7, 10), result_row("Delegation", 3, 10)],
    );

    let mut harness = setup_view_harness(
        ViewKind::FinalResults(employee),
        api,
        Some(manager_session()),
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Planning"), "missing gauge title in {html}");
    assert!(html.contains("7/10 points"), "missing points in {html}");
    assert!(html.contains("#4caf50"), "missing pass color in {html}");
    assert!(html.contains("#f44336"), "missing fail color in {html}");
    assert!(html.contains("50.00%"), "missing average in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn manager_results_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(
        ViewKind::ManagerResults(UserId::new(10)),
        FakeApi::new(),
        Some(manager_session()),
    )
    .await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No results yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tips_view_smoke_renders_composed_lines() {
    let api = FakeApi::new();
    let session = employee_session();
    api.set_final_results(session.user_id, vec![result_row("Planning", 7, 10)]);

    let mut harness = setup_view_harness(ViewKind::Tips, api.clone(), Some(session.clone())).await;
    harness.rebuild();
    // Two rounds: the tips resource awaits the results fetch first.
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Planning"), "missing tip line in {html}");

    // The composed lines were persisted on first view.
    assert!(api.saved_tips_for(session.user_id).is_some());
}
