use super::super::assessments::repository::AssessmentRecord;
use super::super::batch::{Batch, BatchProgress};
use super::super::catalog::QuestionnaireCatalog;
use super::super::domain::{AssessmentStatus, RiskCategory};
use super::super::scoring::{aggregate, classify};
use super::views::{
    BatchReport, CompanyProfileSection, ConclusionSection, DimensionScoreEntry,
    InterpretationBlock, IssuerSignature,
};

/// Action marker used when a dimension has no respondent at all.
pub const INSUFFICIENT_DATA_ACTION: &str = "insufficient data";

/// Fixed closing text of every issued report.
pub const REPORT_DISCLAIMER: &str = "Resultados agregados por dimensão a partir das respostas \
individuais; este documento não substitui avaliação clínica individual e deve ser lido junto ao \
plano de ação da empresa.";

/// Assembles the four report sections for a whole batch. Pure with
/// respect to the records: safe to recompute at will.
pub fn assemble_batch_report(
    catalog: &QuestionnaireCatalog,
    batch: &Batch,
    records: &[AssessmentRecord],
    issuer: IssuerSignature,
) -> BatchReport {
    let scores = score_table(catalog, records);
    let interpretation = interpretation_blocks(&scores);

    BatchReport {
        batch_id: batch.id.clone(),
        profile: profile_section(batch, records),
        scores,
        interpretation,
        conclusion: ConclusionSection {
            observations: None,
            disclaimer: REPORT_DISCLAIMER,
            issuer,
        },
    }
}

/// Single-subject variant used for individual result views; sections and
/// rules are identical to the batch path with one record.
pub fn assemble_subject_report(
    catalog: &QuestionnaireCatalog,
    batch: &Batch,
    record: &AssessmentRecord,
    issuer: IssuerSignature,
) -> BatchReport {
    assemble_batch_report(catalog, batch, std::slice::from_ref(record), issuer)
}

fn profile_section(batch: &Batch, records: &[AssessmentRecord]) -> CompanyProfileSection {
    let progress = BatchProgress::from_records(records);
    let last_submission = records
        .iter()
        .filter_map(|record| record.assessment.submitted_at)
        .max();

    CompanyProfileSection {
        company: batch.company.clone(),
        total_subjects: progress.total,
        completed: progress.completed,
        deactivated: progress.deactivated,
        pending: progress.pending(),
        completion_pct: progress.completion_pct(),
        released_at: batch.released_at,
        last_submission,
    }
}

/// One entry per catalog dimension, in catalog order. Group statistics
/// are nested: each subject contributes their own per-dimension mean, and
/// the group aggregates over those means, never over raw item values.
fn score_table(
    catalog: &QuestionnaireCatalog,
    records: &[AssessmentRecord],
) -> Vec<DimensionScoreEntry> {
    catalog
        .dimensions()
        .iter()
        .map(|dimension| {
            let subject_means: Vec<f64> = records
                .iter()
                .filter(|record| record.assessment.status != AssessmentStatus::Deactivated)
                .filter_map(|record| {
                    let values = record.responses.dimension_values(dimension);
                    if values.is_empty() {
                        None
                    } else {
                        Some(aggregate(&values).mean)
                    }
                })
                .collect();

            let stats = aggregate(&subject_means);

            if subject_means.is_empty() {
                let category = RiskCategory::Low;
                DimensionScoreEntry {
                    dimension: dimension.id,
                    label: dimension.label,
                    polarity: dimension.polarity,
                    polarity_label: dimension.polarity.label(),
                    respondents: 0,
                    mean: stats.mean,
                    std_dev: stats.std_dev,
                    category,
                    category_label: category.label(),
                    semaphore: category.semaphore(),
                    semaphore_label: category.semaphore().label(),
                    action: INSUFFICIENT_DATA_ACTION,
                    insufficient_data: true,
                }
            } else {
                let rating = classify(stats.mean, dimension.polarity);
                DimensionScoreEntry {
                    dimension: dimension.id,
                    label: dimension.label,
                    polarity: dimension.polarity,
                    polarity_label: dimension.polarity.label(),
                    respondents: subject_means.len(),
                    mean: stats.mean,
                    std_dev: stats.std_dev,
                    category: rating.category,
                    category_label: rating.category.label(),
                    semaphore: rating.semaphore,
                    semaphore_label: rating.semaphore.label(),
                    action: rating.action,
                    insufficient_data: false,
                }
            }
        })
        .collect()
}

const fn bucket_heading(category: RiskCategory) -> &'static str {
    match category {
        RiskCategory::Low => "excellent",
        RiskCategory::Medium => "monitor",
        RiskCategory::High => "attention",
    }
}

fn bucket_narrative(category: RiskCategory, labels: &[&'static str]) -> String {
    let list = labels.join(", ");
    match category {
        RiskCategory::Low => format!("Resultados saudáveis a preservar: {list}."),
        RiskCategory::Medium => {
            format!("Dimensões a monitorar com medidas preventivas: {list}.")
        }
        RiskCategory::High => {
            format!("Dimensões que exigem atenção imediata e plano de mitigação: {list}.")
        }
    }
}

/// Partitions the score table into the three ordered narrative buckets.
/// The low, medium, high order is fixed no matter the input order; empty
/// buckets produce no block.
fn interpretation_blocks(scores: &[DimensionScoreEntry]) -> Vec<InterpretationBlock> {
    RiskCategory::ordered()
        .into_iter()
        .filter_map(|category| {
            let dimensions: Vec<&'static str> = scores
                .iter()
                .filter(|entry| entry.category == category)
                .map(|entry| entry.label)
                .collect();

            if dimensions.is_empty() {
                return None;
            }

            Some(InterpretationBlock {
                category,
                heading: bucket_heading(category),
                narrative: bucket_narrative(category, &dimensions),
                dimensions,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::super::assessments::domain::{
        Assessment, AssessmentId, BatchId, ResponseSet, Subject,
    };
    use super::super::super::domain::{AnswerValue, RespondentRole, Semaphore};
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
    }

    fn batch() -> Batch {
        Batch {
            id: BatchId("batch-0001".to_string()),
            company: "Metalúrgica Aurora".to_string(),
            released_at: noon(1),
        }
    }

    fn record_with_uniform_answers(suffix: &str, points: u8) -> AssessmentRecord {
        let catalog = QuestionnaireCatalog::standard();
        let assessment = Assessment::released(
            AssessmentId(format!("assess-{suffix}")),
            BatchId("batch-0001".to_string()),
            Subject {
                employee_id: format!("emp-{suffix}"),
                name: format!("Subject {suffix}"),
                role: RespondentRole::Operational,
                sector: None,
            },
            noon(1),
        );

        let mut responses = ResponseSet::new();
        for dimension in catalog.dimensions() {
            responses.record_dimension(
                dimension
                    .items
                    .iter()
                    .map(|item| {
                        (
                            item.key.to_string(),
                            AnswerValue::from_points(points).expect("scale value"),
                        )
                    })
                    .collect(),
            );
        }

        AssessmentRecord {
            assessment,
            responses,
        }
    }

    fn issuer() -> IssuerSignature {
        IssuerSignature {
            name: "Dra. Helena Prado".to_string(),
            registry: "CRP 06/12345".to_string(),
        }
    }

    #[test]
    fn score_table_covers_all_dimensions_even_without_responses() {
        let catalog = QuestionnaireCatalog::standard();
        let report = assemble_batch_report(&catalog, &batch(), &[], issuer());

        assert_eq!(report.scores.len(), 10);
        for entry in &report.scores {
            assert!(entry.insufficient_data);
            assert_eq!(entry.mean, 0.0);
            assert_eq!(entry.std_dev, 0.0);
            assert_eq!(entry.semaphore, Semaphore::Green);
            assert_eq!(entry.action, INSUFFICIENT_DATA_ACTION);
        }
        assert!(report.profile.last_submission.is_none());
    }

    #[test]
    fn interpretation_buckets_keep_fixed_order() {
        let catalog = QuestionnaireCatalog::standard();
        // All answers at 100: negative dimensions land high, positive low.
        let records = [record_with_uniform_answers("a", 100)];
        let report = assemble_batch_report(&catalog, &batch(), &records, issuer());

        assert_eq!(report.interpretation.len(), 2);
        assert_eq!(report.interpretation[0].category, RiskCategory::Low);
        assert_eq!(report.interpretation[0].heading, "excellent");
        assert_eq!(report.interpretation[1].category, RiskCategory::High);
        assert_eq!(report.interpretation[1].heading, "attention");

        let low_block = &report.interpretation[0];
        assert!(low_block.dimensions.contains(&"Relações Sociais"));
        assert!(low_block.narrative.contains("Relações Sociais"));
    }

    #[test]
    fn deactivated_subjects_do_not_contribute_scores() {
        let catalog = QuestionnaireCatalog::standard();
        let mut dropped = record_with_uniform_answers("b", 0);
        dropped.deactivate().expect("deactivates");
        let records = [dropped];

        let report = assemble_batch_report(&catalog, &batch(), &records, issuer());
        assert!(report.scores.iter().all(|entry| entry.insufficient_data));
        assert_eq!(report.profile.deactivated, 1);
    }

    #[test]
    fn conclusion_carries_disclaimer_and_issuer() {
        let catalog = QuestionnaireCatalog::standard();
        let report = assemble_batch_report(&catalog, &batch(), &[], issuer());
        assert_eq!(report.conclusion.disclaimer, REPORT_DISCLAIMER);
        assert_eq!(report.conclusion.issuer, issuer());
        assert!(report.conclusion.observations.is_none());
    }
}
