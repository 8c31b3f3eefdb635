//! Report Formatter: fixed-layout, human-readable screening report.

use super::{ScreenError, ScreeningResult};

const RULE_WIDTH: usize = 50;

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Renders a result into the report layout that is printed and saved to disk.
pub fn render_report(result: &ScreeningResult) -> String {
    let mut lines = vec![
        rule('='),
        "         SCREENING REPORT".to_string(),
        rule('='),
        format!("\nCandidate: {}", result.candidate_name),
        format!("Match Score: {}/100", result.match_score),
        format!("Decision: {}", result.recommendation),
        "\nKey Strengths:".to_string(),
    ];

    for strength in &result.key_strengths {
        lines.push(format!("   - {strength}"));
    }

    lines.push("\nMissing Skills:".to_string());
    if result.missing_critical_skills.is_empty() {
        lines.push("   - None identified".to_string());
    } else {
        for skill in &result.missing_critical_skills {
            lines.push(format!("   - {skill}"));
        }
    }

    lines.push(format!("\nReasoning: {}", result.reasoning));
    lines.push(format!("\n{}", rule('=')));

    lines.join("\n")
}

/// Console message for a resume that could not be screened.
/// Parse failures include the raw model output so it can be inspected by hand.
pub fn render_failure(err: &ScreenError) -> String {
    match err {
        ScreenError::Parse(failure) => {
            format!("[WARNING] Failed to parse JSON. Raw output:\n{}", failure.raw)
        }
        other => format!("[ERROR] {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractError;
    use crate::screening::{parse_screening_response, MatchScore, Recommendation};
    use std::path::PathBuf;

    fn sample() -> ScreeningResult {
        ScreeningResult {
            candidate_name: "John Smith".to_string(),
            match_score: MatchScore::Text("78".to_string()),
            key_strengths: vec!["Python".to_string(), "SQL".to_string()],
            missing_critical_skills: vec!["AWS".to_string()],
            recommendation: Recommendation::Interview,
            reasoning: "Solid fundamentals. Needs cloud exposure.".to_string(),
        }
    }

    #[test]
    fn test_report_layout() {
        let expected = "\
==================================================
         SCREENING REPORT
==================================================

Candidate: John Smith
Match Score: 78/100
Decision: INTERVIEW

Key Strengths:
   - Python
   - SQL

Missing Skills:
   - AWS

Reasoning: Solid fundamentals. Needs cloud exposure.

==================================================";
        assert_eq!(render_report(&sample()), expected);
    }

    #[test]
    fn test_report_without_missing_skills() {
        let mut result = sample();
        result.missing_critical_skills.clear();
        let report = render_report(&result);
        assert!(report.contains("Missing Skills:\n   - None identified"));
    }

    #[test]
    fn test_report_for_empty_response_uses_placeholders() {
        let result = parse_screening_response("{}").unwrap();
        let report = render_report(&result);
        assert!(report.contains("Candidate: Unknown"));
        assert!(report.contains("Match Score: N/A/100"));
        assert!(report.contains("Decision: N/A"));
        assert!(report.contains("Key Strengths:\n\nMissing Skills:"));
        assert!(report.contains("Reasoning: N/A"));
    }

    #[test]
    fn test_failure_message_includes_raw_output() {
        let failure = parse_screening_response("no json here").unwrap_err();
        let message = render_failure(&ScreenError::Parse(failure));
        assert_eq!(
            message,
            "[WARNING] Failed to parse JSON. Raw output:\nno json here"
        );
    }

    #[test]
    fn test_failure_message_for_extraction_error() {
        let err = ScreenError::Extraction(ExtractError::NotFound(PathBuf::from("cv.pdf")));
        assert_eq!(
            render_failure(&err),
            "[ERROR] Error loading resume: file not found: cv.pdf"
        );
    }
}
