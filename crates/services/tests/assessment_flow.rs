use assess_core::flow::{QuizStep, SectionSequencer};
use assess_core::model::{
    AnswerSheet, Choice, ChoiceId, EvaluationTarget, OrganizationId, Question, QuestionId,
    Section, SectionId, SubSection, SubSectionId, UserId, UserSession, all_question_ids,
};
use assess_core::time::fixed_clock;
use services::api::FakeEvent;
use services::{AppServices, CompletionFlag, FakeApi, FlagUpdate};

fn seeded_api() -> FakeApi {
    let api = FakeApi::new();
    api.set_reference_data(
        vec![
            Section::new(SectionId::new(1), "Skills"),
            Section::new(SectionId::new(2), "Attitude"),
            Section::new(SectionId::new(3), "Evaluation").for_manager_evaluation(),
        ],
        vec![
            SubSection {
                id: SubSectionId::new(10),
                title: "Planning".into(),
                section_id: SectionId::new(1),
            },
            SubSection {
                id: SubSectionId::new(20),
                title: "Teamwork".into(),
                section_id: SectionId::new(2),
            },
            SubSection {
                id: SubSectionId::new(30),
                title: "Performance".into(),
                section_id: SectionId::new(3),
            },
        ],
        vec![
            Question {
                id: QuestionId::new(100),
                text: "How do you plan your week?".into(),
                sub_section_id: SubSectionId::new(10),
            },
            Question {
                id: QuestionId::new(101),
                text: "How do you track deadlines?".into(),
                sub_section_id: SubSectionId::new(10),
            },
            Question {
                id: QuestionId::new(200),
                text: "How do you handle disagreement?".into(),
                sub_section_id: SubSectionId::new(20),
            },
            Question {
                id: QuestionId::new(300),
                text: "Does the employee meet targets?".into(),
                sub_section_id: SubSectionId::new(30),
            },
        ],
        vec![
            Choice {
                id: ChoiceId::new(1000),
                text: "Every Monday".into(),
                question_id: QuestionId::new(100),
                is_correct: 1,
            },
            Choice {
                id: ChoiceId::new(1010),
                text: "In a calendar".into(),
                question_id: QuestionId::new(101),
                is_correct: 1,
            },
            Choice {
                id: ChoiceId::new(2000),
                text: "I listen first".into(),
                question_id: QuestionId::new(200),
                is_correct: 1,
            },
            Choice {
                id: ChoiceId::new(3000),
                text: "Yes".into(),
                question_id: QuestionId::new(300),
                is_correct: 1,
            },
        ],
    );
    api
}

#[tokio::test]
async fn self_assessment_walks_sections_and_flags_completion() {
    let api = seeded_api();
    let services = AppServices::new_in_memory(api.clone(), fixed_clock())
        .await
        .expect("assemble services");

    let session = UserSession::new(UserId::new(7), OrganizationId::new(1), 2);
    services.sessions().sign_in(session.clone()).await.expect("sign in");

    let plan = services.quiz().self_assessment_plan(session.is_manager()).await;
    // Basic info, two visible sections, results.
    assert_eq!(plan.len(), 4);
    assert_eq!(plan.step(0), Some(&QuizStep::BasicInfo));

    let mut sequencer = SectionSequencer::new(plan.len(), session.progress_step());
    assert_eq!(sequencer.progress(), 8);
    sequencer.advance();

    // First section screen.
    let QuizStep::Questions(section) = plan.step(sequencer.index()).expect("step") else {
        panic!("expected a question step");
    };
    let groups = services.quiz().section_questions(section.id).await;
    let question_ids = all_question_ids(&groups);
    assert_eq!(
        question_ids,
        vec![QuestionId::new(100), QuestionId::new(101)]
    );

    let mut sheet = AnswerSheet::new();
    sheet.select(QuestionId::new(100), ChoiceId::new(1000));
    sheet.select(QuestionId::new(101), ChoiceId::new(1010));
    let report = services
        .submission()
        .submit(
            &sheet,
            &question_ids,
            session.user_id,
            EvaluationTarget::SelfAssessment,
            None,
        )
        .await
        .expect("submit first section");
    assert!(report.is_complete_success());
    assert_eq!(report.flag_update, FlagUpdate::Skipped);
    sequencer.advance();

    // Second (final) section screen sets the flag.
    let QuizStep::Questions(section) = plan.step(sequencer.index()).expect("step") else {
        panic!("expected a question step");
    };
    let groups = services.quiz().section_questions(section.id).await;
    let question_ids = all_question_ids(&groups);
    let mut sheet = AnswerSheet::new();
    sheet.select(QuestionId::new(200), ChoiceId::new(2000));
    let report = services
        .submission()
        .submit(
            &sheet,
            &question_ids,
            session.user_id,
            EvaluationTarget::SelfAssessment,
            Some(CompletionFlag::SelfAssessment),
        )
        .await
        .expect("submit final section");
    assert_eq!(report.flag_update, FlagUpdate::Succeeded);

    services
        .sessions()
        .update(|s| s.assessment_completed = true)
        .await
        .expect("update session");
    assert!(
        services
            .sessions()
            .current()
            .is_some_and(|s| s.assessment_completed)
    );

    sequencer.advance();
    assert_eq!(
        plan.step(sequencer.index()),
        Some(&QuizStep::LoadingResults)
    );
    assert_eq!(sequencer.progress(), 98);

    // All three answers were written, and the flag came last.
    let events = api.events();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[3],
        FakeEvent::FlagUpdate(session.user_id, CompletionFlag::SelfAssessment)
    );
}

#[tokio::test]
async fn manager_evaluation_targets_the_selected_employee() {
    let api = seeded_api();
    let services = AppServices::new_in_memory(api.clone(), fixed_clock())
        .await
        .expect("assemble services");

    let manager = UserSession::new(UserId::new(1), OrganizationId::new(1), 3);
    services.sessions().sign_in(manager.clone()).await.expect("sign in");
    assert!(manager.is_manager());

    let plan = services.quiz().manager_evaluation_plan().await;
    // One evaluation section plus the results step.
    assert_eq!(plan.len(), 2);

    let QuizStep::Questions(section) = plan.step(0).expect("step") else {
        panic!("expected a question step");
    };
    let groups = services.quiz().section_questions(section.id).await;
    let question_ids = all_question_ids(&groups);
    assert_eq!(question_ids, vec![QuestionId::new(300)]);

    let employee = UserId::new(9);
    let mut sheet = AnswerSheet::new();
    sheet.select(QuestionId::new(300), ChoiceId::new(3000));
    let report = services
        .submission()
        .submit(
            &sheet,
            &question_ids,
            manager.user_id,
            EvaluationTarget::Employee(employee),
            Some(CompletionFlag::ManagerAssessment),
        )
        .await
        .expect("submit evaluation");
    assert!(report.is_complete_success());

    let answers = api.recorded_answers();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].user_id, manager.user_id);
    assert_eq!(answers[0].target_user_id, employee.value());

    // The completion flag lands on the evaluated employee, not the manager.
    let flags: Vec<_> = api
        .events()
        .into_iter()
        .filter(|e| matches!(e, FakeEvent::FlagUpdate(..)))
        .collect();
    assert_eq!(
        flags,
        vec![FakeEvent::FlagUpdate(
            employee,
            CompletionFlag::ManagerAssessment
        )]
    );
}
