//! Development-tip composition from final assessment results.
//!
//! Tips are persisted on the user record as a single newline-joined string;
//! composition runs once, after which the saved string is reused.

use crate::model::SubsectionResult;

/// Fixed advice appended after the per-result lines.
pub const STATIC_TIPS: [&str; 5] = [
    "Review your assessment results carefully to identify your strengths.",
    "Build a personal development plan based on the results.",
    "Discuss the results with your manager for guidance.",
    "Share ideas with colleagues to exchange experience.",
    "Ask for training or resources to grow your skills.",
];

/// Composes one tip line per result row followed by the static advice.
#[must_use]
pub fn compose_tips(rows: &[SubsectionResult]) -> Vec<String> {
    let mut tips: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "In {} / {}: you answered {} of {} questions correctly.",
                row.section_title,
                row.sub_section_title,
                row.correct_answers,
                row.total_questions_answered,
            )
        })
        .collect();
    tips.extend(STATIC_TIPS.iter().map(|tip| (*tip).to_string()));
    tips
}

/// Joins tips into the persisted representation.
#[must_use]
pub fn join_tips(tips: &[String]) -> String {
    tips.join("\n")
}

/// Splits a persisted tips string back into lines, dropping blanks.
#[must_use]
pub fn split_tips(saved: &str) -> Vec<String> {
    saved
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_result_lines_before_static_advice() {
        let rows = vec![SubsectionResult {
            section_title: "Skills".into(),
            sub_section_title: "Planning".into(),
            correct_answers: 3,
            total_questions_answered: 5,
        }];
        let tips = compose_tips(&rows);
        assert_eq!(tips.len(), 1 + STATIC_TIPS.len());
        assert!(tips[0].contains("3 of 5"));
        assert_eq!(tips[1], STATIC_TIPS[0]);
    }

    #[test]
    fn join_and_split_round_trip() {
        let tips = compose_tips(&[]);
        let saved = join_tips(&tips);
        assert_eq!(split_tips(&saved), tips);
    }

    #[test]
    fn split_drops_blank_lines() {
        assert_eq!(split_tips("a\n\n b \n"), vec!["a".to_string(), " b ".to_string()]);
    }
}
