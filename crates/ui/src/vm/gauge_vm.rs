use assess_core::model::{SectionAverage, SectionResults, gauge_props};

/// Display-ready values for one achievement gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeVm {
    pub title: String,
    pub percent_str: String,
    pub points: String,
    pub color: &'static str,
}

/// Display-ready values for one section average bar.
#[derive(Clone, Debug, PartialEq)]
pub struct AverageVm {
    pub title: String,
    pub percent_str: String,
    pub width_pct: f64,
}

#[must_use]
pub fn map_section_gauges(section: &SectionResults) -> Vec<GaugeVm> {
    section
        .rows
        .iter()
        .map(|row| {
            let props = gauge_props(row);
            GaugeVm {
                title: props.title,
                percent_str: format!("{:.0}%", props.percent),
                points: props.points,
                color: props.color,
            }
        })
        .collect()
}

#[must_use]
pub fn map_averages(averages: &[SectionAverage]) -> Vec<AverageVm> {
    averages
        .iter()
        .map(|avg| AverageVm {
            title: avg.title.clone(),
            percent_str: format!("{:.2}%", avg.average),
            width_pct: avg.average.clamp(0.0, 100.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::{FAIL_COLOR, PASS_COLOR, SubsectionResult};

    fn row(sub: &str, correct: u32, total: u32) -> SubsectionResult {
        SubsectionResult {
            section_title: "Skills".into(),
            sub_section_title: sub.into(),
            correct_answers: correct,
            total_questions_answered: total,
        }
    }

    #[test]
    fn gauges_carry_pass_fail_colors() {
        let section = SectionResults {
            title: "Skills".into(),
            rows: vec![row("Planning", 7, 10), row("Delegation", 6, 10)],
        };
        let gauges = map_section_gauges(&section);
        assert_eq!(gauges[0].color, PASS_COLOR);
        assert_eq!(gauges[0].points, "7/10");
        assert_eq!(gauges[0].percent_str, "70%");
        assert_eq!(gauges[1].color, FAIL_COLOR);
    }

    #[test]
    fn averages_render_two_decimals() {
        let averages = vec![SectionAverage {
            title: "Skills".into(),
            average: 66.67,
        }];
        let vms = map_averages(&averages);
        assert_eq!(vms[0].percent_str, "66.67%");
        assert!((vms[0].width_pct - 66.67).abs() < f64::EPSILON);
    }
}
