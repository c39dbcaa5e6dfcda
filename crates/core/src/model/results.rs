use serde::{Deserialize, Serialize};

/// Gauge color used at or above the pass threshold.
pub const PASS_COLOR: &str = "#4caf50";
/// Gauge color below the pass threshold.
pub const FAIL_COLOR: &str = "#f44336";
/// Inclusive pass threshold in percent.
pub const PASS_THRESHOLD: f64 = 70.0;

/// One per-sub-section result row as computed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionResult {
    pub section_title: String,
    pub sub_section_title: String,
    pub correct_answers: u32,
    pub total_questions_answered: u32,
}

impl SubsectionResult {
    /// Percentage of correct answers, treating an empty total as 0 to avoid
    /// a division error.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total_questions_answered == 0 {
            return 0.0;
        }
        f64::from(self.correct_answers) / f64::from(self.total_questions_answered) * 100.0
    }
}

/// Result rows grouped under their parent section title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResults {
    pub title: String,
    pub rows: Vec<SubsectionResult>,
}

/// Mean percentage across one section's sub-section rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAverage {
    pub title: String,
    pub average: f64,
}

/// Display-ready values for a single achievement gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeProps {
    pub title: String,
    pub percent: f64,
    /// e.g. "7/10".
    pub points: String,
    pub color: &'static str,
}

/// Partitions rows by section title, preserving first-seen order.
#[must_use]
pub fn group_by_section(rows: &[SubsectionResult]) -> Vec<SectionResults> {
    let mut groups: Vec<SectionResults> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| g.title == row.section_title) {
            Some(group) => group.rows.push(row.clone()),
            None => groups.push(SectionResults {
                title: row.section_title.clone(),
                rows: vec![row.clone()],
            }),
        }
    }
    groups
}

/// Mean of per-row percentages for each section, rounded to two decimals.
///
/// Empty input yields an empty result.
#[must_use]
pub fn compute_averages(rows: &[SubsectionResult]) -> Vec<SectionAverage> {
    group_by_section(rows)
        .into_iter()
        .map(|group| {
            let sum: f64 = group.rows.iter().map(SubsectionResult::percent).sum();
            let mean = sum / group.rows.len() as f64;
            SectionAverage {
                title: group.title,
                average: (mean * 100.0).round() / 100.0,
            }
        })
        .collect()
}

/// Maps one row to gauge display values. The pass threshold is inclusive
/// at 70%.
#[must_use]
pub fn gauge_props(row: &SubsectionResult) -> GaugeProps {
    let percent = row.percent();
    GaugeProps {
        title: row.sub_section_title.clone(),
        percent,
        points: format!("{}/{}", row.correct_answers, row.total_questions_answered),
        color: if percent >= PASS_THRESHOLD {
            PASS_COLOR
        } else {
            FAIL_COLOR
        },
    }
}
