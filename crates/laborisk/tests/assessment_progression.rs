use chrono::{NaiveDate, NaiveDateTime};
use laborisk::workflows::questionnaire::assessments::{
    Assessment, AssessmentId, AssessmentRecord, BackNavigation, BatchId, DimensionSubmission,
    ItemAnswer, ResponseSet, SaveOutcome, Subject,
};
use laborisk::workflows::questionnaire::domain::{AssessmentStatus, RespondentRole};
use laborisk::workflows::questionnaire::QuestionnaireCatalog;

fn noon(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, day)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

fn released_record() -> AssessmentRecord {
    AssessmentRecord {
        assessment: Assessment::released(
            AssessmentId("assess-int-001".to_string()),
            BatchId("batch-int-01".to_string()),
            Subject {
                employee_id: "E-100".to_string(),
                name: "Joana Ribeiro".to_string(),
                role: RespondentRole::Operational,
                sector: Some("Logística".to_string()),
            },
            noon(1),
        ),
        responses: ResponseSet::new(),
    }
}

fn submission(catalog: &QuestionnaireCatalog, dimension: u8, points: u8) -> DimensionSubmission {
    let template = catalog.dimension(dimension).expect("dimension exists");
    DimensionSubmission {
        dimension,
        items: template
            .items
            .iter()
            .map(|item| ItemAnswer {
                item: item.key.to_string(),
                value: points,
            })
            .collect(),
    }
}

#[test]
fn back_navigation_is_unrestricted_until_a_resume_is_detected() {
    let catalog = QuestionnaireCatalog::standard();
    let mut record = released_record();

    for dimension in 1..=4 {
        record
            .save_dimension(&catalog, &submission(&catalog, dimension, 50), noon(2))
            .expect("dimension saves");
    }
    assert_eq!(record.assessment.current_dimension, 5);
    assert!(record.assessment.resume_anchor.is_none());

    // No anchor was ever recorded, so the subject may walk all the way
    // back to the first dimension.
    for expected in (1..=4).rev() {
        assert_eq!(
            record.navigate_back(),
            BackNavigation::MovedTo {
                dimension: expected
            }
        );
    }
    assert_eq!(record.navigate_back(), BackNavigation::Home);
}

#[test]
fn resume_detection_pins_the_floor_for_the_rest_of_the_assessment() {
    let catalog = QuestionnaireCatalog::standard();
    let mut record = released_record();

    for dimension in 1..=3 {
        record
            .save_dimension(&catalog, &submission(&catalog, dimension, 50), noon(2))
            .expect("dimension saves");
    }

    // Fresh client session reports current dimension 4.
    assert_eq!(record.reopen(), Some(4));

    for dimension in 4..=5 {
        record
            .save_dimension(&catalog, &submission(&catalog, dimension, 50), noon(3))
            .expect("dimension saves");
    }
    assert_eq!(record.assessment.current_dimension, 6);

    // From dimension 6: back to 5, back to 4, then a silent refusal.
    assert_eq!(
        record.navigate_back(),
        BackNavigation::MovedTo { dimension: 5 }
    );
    assert_eq!(
        record.navigate_back(),
        BackNavigation::MovedTo { dimension: 4 }
    );
    assert_eq!(record.navigate_back(), BackNavigation::Refused);
    assert_eq!(record.assessment.current_dimension, 4);
    assert_eq!(record.navigate_back(), BackNavigation::Refused);
    assert_eq!(record.assessment.current_dimension, 4);
}

#[test]
fn completing_every_dimension_finishes_the_assessment() {
    let catalog = QuestionnaireCatalog::standard();
    let mut record = released_record();

    for dimension in 1..=9 {
        let outcome = record
            .save_dimension(&catalog, &submission(&catalog, dimension, 25), noon(2))
            .expect("dimension saves");
        assert_eq!(
            outcome,
            SaveOutcome::Advanced {
                next_dimension: dimension + 1
            }
        );
    }

    record.reopen();
    assert!(record.assessment.resume_anchor.is_some());

    let outcome = record
        .save_dimension(&catalog, &submission(&catalog, 10, 25), noon(7))
        .expect("final dimension saves");
    assert_eq!(outcome, SaveOutcome::Completed);
    assert_eq!(record.assessment.status, AssessmentStatus::Completed);
    assert_eq!(record.assessment.submitted_at, Some(noon(7)));
    assert!(
        record.assessment.resume_anchor.is_none(),
        "completion clears the anchor"
    );
    assert_eq!(record.responses.len(), 40);
}

#[test]
fn there_is_no_forward_path_without_answering() {
    let catalog = QuestionnaireCatalog::standard();
    let mut record = released_record();

    // An empty submission for the current dimension is rejected, naming
    // the first unanswered item; the pointer does not move.
    let empty = DimensionSubmission {
        dimension: 1,
        items: Vec::new(),
    };
    let error = record
        .save_dimension(&catalog, &empty, noon(2))
        .expect_err("empty submission rejected");
    assert!(error.to_string().contains("demandas_prazos"));
    assert_eq!(record.assessment.current_dimension, 1);
}
