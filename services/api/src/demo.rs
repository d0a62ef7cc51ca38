use crate::infra::{InMemoryAssessmentRepository, SAMPLE_ROSTER_CSV};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Args;
use laborisk::error::AppError;
use laborisk::workflows::questionnaire::assessments::{
    AssessmentId, AssessmentRepository, AssessmentService, BackNavigation, DimensionSubmission,
    ItemAnswer, Subject,
};
use laborisk::workflows::questionnaire::domain::AnswerValue;
use laborisk::workflows::questionnaire::report::views::{BatchReport, IssuerSignature};
use laborisk::workflows::questionnaire::report::ReportDocument;
use laborisk::workflows::questionnaire::{BatchReadinessView, QuestionnaireCatalog};
use laborisk::workflows::roster::RosterImporter;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct BatchReportArgs {
    /// Employer roster CSV to release; defaults to a built-in sample
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Company name stamped on the report
    #[arg(long, default_value = "Metalúrgica Aurora")]
    pub(crate) company: String,
    /// Release date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) released: Option<NaiveDate>,
    /// Simulate every subject answering before assembling the report
    #[arg(long)]
    pub(crate) simulate: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Employer roster CSV to release; defaults to a built-in sample
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Company name stamped on the report
    #[arg(long, default_value = "Metalúrgica Aurora")]
    pub(crate) company: String,
    /// Issuer observations appended to the report conclusion
    #[arg(long)]
    pub(crate) observations: Option<String>,
}

fn demo_issuer() -> IssuerSignature {
    IssuerSignature {
        name: "Dra. Helena Prado".to_string(),
        registry: "CRP 06/12345".to_string(),
    }
}

fn load_subjects(roster_csv: Option<PathBuf>) -> Result<Vec<Subject>, AppError> {
    match roster_csv {
        Some(path) => RosterImporter::from_path(path).map_err(AppError::from),
        None => RosterImporter::from_reader(Cursor::new(SAMPLE_ROSTER_CSV.as_bytes()))
            .map_err(AppError::from),
    }
}

fn full_submission(
    catalog: &QuestionnaireCatalog,
    dimension: u8,
    points: u8,
) -> DimensionSubmission {
    let template = catalog
        .dimension(dimension)
        .expect("demo only uses catalog dimensions");
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

/// Deterministic answer pattern so demo runs are reproducible: each
/// subject sweeps the scale at a different phase.
fn demo_points(subject_index: usize, dimension: u8) -> u8 {
    AnswerValue::SCALE[(subject_index * 2 + dimension as usize) % AnswerValue::SCALE.len()]
}

fn complete_assessment(
    service: &AssessmentService<InMemoryAssessmentRepository>,
    id: &AssessmentId,
    subject_index: usize,
    from_dimension: u8,
    now: NaiveDateTime,
) -> Result<(), AppError> {
    for dimension in from_dimension..=QuestionnaireCatalog::DIMENSION_COUNT {
        let submission = full_submission(
            service.catalog(),
            dimension,
            demo_points(subject_index, dimension),
        );
        service.save_dimension(id, &submission, now)?;
    }
    Ok(())
}

pub(crate) fn run_batch_report(args: BatchReportArgs) -> Result<(), AppError> {
    let BatchReportArgs {
        roster_csv,
        company,
        released,
        simulate,
    } = args;

    let released_at = released
        .map(crate::infra::start_of_day)
        .unwrap_or_else(|| Local::now().naive_local());
    let subjects = load_subjects(roster_csv)?;

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = AssessmentService::new(repository.clone(), demo_issuer());
    let batch = service.release_batch(&company, subjects, released_at)?;

    if simulate {
        let ids: Vec<AssessmentId> = repository
            .list_by_batch(&batch.id)
            .map_err(laborisk::workflows::questionnaire::assessments::AssessmentServiceError::from)
            .map_err(AppError::from)?
            .into_iter()
            .map(|record| record.assessment.id)
            .collect();
        for (index, id) in ids.iter().enumerate() {
            complete_assessment(&service, id, index, 1, released_at)?;
        }
    }

    let readiness = service.batch_readiness(&batch.id)?;
    render_readiness(&readiness);

    let report = service.batch_report(&batch.id)?;
    render_batch_report(&report);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster_csv,
        company,
        observations,
    } = args;

    let now = Local::now().naive_local();
    let subjects = load_subjects(roster_csv)?;

    println!("Psychosocial risk questionnaire demo");
    println!("Company: {company} | roster subjects: {}", subjects.len());

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = AssessmentService::new(repository.clone(), demo_issuer());
    let batch = service.release_batch(&company, subjects, now)?;
    println!("Released batch {}", batch.id.0);

    let ids: Vec<AssessmentId> = repository
        .list_by_batch(&batch.id)
        .map_err(laborisk::workflows::questionnaire::assessments::AssessmentServiceError::from)
        .map_err(AppError::from)?
        .into_iter()
        .map(|record| record.assessment.id)
        .collect();

    render_readiness(&service.batch_readiness(&batch.id)?);

    // First subject: answer three dimensions, leave, and come back. The
    // reopen pins the resume anchor, so walking back below it refuses.
    let first = &ids[0];
    service.start(first)?;
    for dimension in 1..=3 {
        let submission = full_submission(service.catalog(), dimension, demo_points(0, dimension));
        service.save_dimension(first, &submission, now)?;
    }
    let view = service.reopen(first)?;
    println!(
        "\nSubject {} returned at dimension {} (resume anchor {:?})",
        first.0, view.current_dimension, view.resume_anchor
    );
    match service.navigate_back(first)? {
        BackNavigation::Refused => {
            println!("Back navigation below the anchor was silently refused")
        }
        other => println!("Back navigation outcome: {other:?}"),
    }
    complete_assessment(&service, first, 0, 4, now)?;
    println!("Subject {} completed the questionnaire", first.0);

    // Remaining subjects answer everything except the last one, which is
    // administratively deactivated.
    for (index, id) in ids.iter().enumerate().skip(1) {
        if index == ids.len() - 1 {
            service.deactivate(id)?;
            println!("Subject {} deactivated by the administrator", id.0);
        } else {
            complete_assessment(&service, id, index, 1, now)?;
        }
    }

    let readiness = service.batch_readiness(&batch.id)?;
    render_readiness(&readiness);
    if readiness.ready {
        println!("Batch is ready; assembling the report");
    }

    let report = service.batch_report(&batch.id)?;
    render_batch_report(&report);

    // Document lifecycle: draft, observations, issue, send.
    let mut document = ReportDocument::draft(report, now);
    let note = observations.unwrap_or_else(|| {
        "Recomenda-se priorizar as dimensões sinalizadas em vermelho no plano anual.".to_string()
    });
    document.set_observations(note)?;
    document.issue(now)?;
    document.mark_sent(now)?;
    println!(
        "\nReport document: {} (drafted {}, issued {:?}, sent {:?})",
        document.status.label(),
        document.drafted_at,
        document.issued_at,
        document.sent_at
    );

    if let Some(view) = repository
        .fetch(first)
        .ok()
        .flatten()
        .map(|record| record.status_view())
    {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("\nStatus payload of subject {}:\n{json}", first.0),
            Err(err) => println!("\nStatus payload unavailable: {err}"),
        }
    }

    Ok(())
}

fn render_readiness(readiness: &BatchReadinessView) {
    println!(
        "\nBatch {} readiness: {} ({} total, {} completed, {} deactivated, {} pending)",
        readiness.batch_id.0,
        if readiness.ready { "ready" } else { "waiting" },
        readiness.total,
        readiness.completed,
        readiness.deactivated,
        readiness.pending
    );
}

pub(crate) fn render_batch_report(report: &BatchReport) {
    println!("\nCompany profile");
    println!(
        "- {} | {} subjects | {:.0}% completed",
        report.profile.company, report.profile.total_subjects, report.profile.completion_pct
    );
    match report.profile.last_submission {
        Some(last) => println!(
            "- Released {} | last submission {}",
            report.profile.released_at, last
        ),
        None => println!("- Released {} | no submissions yet", report.profile.released_at),
    }

    println!("\nScore table");
    for entry in &report.scores {
        if entry.insufficient_data {
            println!(
                "- D{:02} {} [{}] -> {}",
                entry.dimension, entry.label, entry.polarity_label, entry.action
            );
        } else {
            println!(
                "- D{:02} {} [{}] mean {:.1} sd {:.1} -> {} ({}) | {}",
                entry.dimension,
                entry.label,
                entry.polarity_label,
                entry.mean,
                entry.std_dev,
                entry.category_label,
                entry.semaphore_label,
                entry.action
            );
        }
    }

    println!("\nInterpretation");
    for block in &report.interpretation {
        println!("- [{}] {}", block.heading, block.narrative);
    }

    println!("\nConclusion");
    if let Some(observations) = &report.conclusion.observations {
        println!("- Observations: {observations}");
    }
    println!("- {}", report.conclusion.disclaimer);
    println!(
        "- {} ({})",
        report.conclusion.issuer.name, report.conclusion.issuer.registry
    );
}
