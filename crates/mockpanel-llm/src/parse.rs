//! Strict verdict payload parsing.
//!
//! The backend is instructed to answer with a single JSON object, but may
//! wrap it in prose. [`extract_json_object`] pulls out the first balanced
//! object; [`parse_verdict`] then validates it against the persona's
//! declared contract. Any deviation is a hard failure for that panelist
//! call — never a defaulted verdict.

use serde::Deserialize;

use mockpanel_core::{DimensionScore, Panelist, PanelistVerdict, Verdict};

use crate::error::{LlmError, LlmResult};

/// Find the first balanced `{…}` object in `text`.
///
/// Brace depth is tracked outside of string literals so braces inside
/// rationale text don't truncate the object.
pub fn extract_json_object(text: &str) -> LlmResult<&str> {
    let start = text.find('{').ok_or(LlmError::NoJsonPayload)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    Err(LlmError::NoJsonPayload)
}

/// Raw wire shape of one panelist's verdict payload.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    verdict: Verdict,
    confidence: u16,
    scores: Vec<RawScore>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default, rename = "redFlags")]
    red_flags: Vec<String>,
    #[serde(rename = "rawFeedback")]
    raw_feedback: String,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    dimension: String,
    score: u16,
    rationale: String,
}

fn malformed(panelist: &Panelist, detail: impl Into<String>) -> LlmError {
    LlmError::MalformedVerdict {
        panelist: panelist.name.clone(),
        detail: detail.into(),
    }
}

/// Parse and validate the backend's raw text into a [`PanelistVerdict`].
pub fn parse_verdict(panelist: &Panelist, raw_text: &str) -> LlmResult<PanelistVerdict> {
    let payload = extract_json_object(raw_text)?;
    let raw: RawVerdict =
        serde_json::from_str(payload).map_err(|e| malformed(panelist, e.to_string()))?;

    if raw.confidence > 100 {
        return Err(malformed(
            panelist,
            format!("confidence {} out of range (0-100)", raw.confidence),
        ));
    }
    if raw.scores.len() != panelist.dimensions.len() {
        return Err(malformed(
            panelist,
            format!(
                "expected {} dimension scores, got {}",
                panelist.dimensions.len(),
                raw.scores.len()
            ),
        ));
    }
    for score in &raw.scores {
        if !(1..=5).contains(&score.score) {
            return Err(malformed(
                panelist,
                format!(
                    "score {} for dimension '{}' out of range (1-5)",
                    score.score, score.dimension
                ),
            ));
        }
    }

    Ok(PanelistVerdict {
        panelist_id: panelist.kind.as_str().to_string(),
        panelist_name: panelist.name.clone(),
        verdict: raw.verdict,
        confidence: raw.confidence as u8,
        scores: raw
            .scores
            .into_iter()
            .map(|s| DimensionScore {
                dimension: s.dimension,
                score: s.score as u8,
                rationale: s.rationale,
            })
            .collect(),
        strengths: raw.strengths,
        red_flags: raw.red_flags,
        raw_feedback: raw.raw_feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockpanel_core::default_panel;

    fn recruiter() -> Panelist {
        default_panel().into_iter().nth(2).unwrap()
    }

    fn valid_payload() -> String {
        let scores: Vec<String> = recruiter()
            .dimensions
            .iter()
            .map(|d| format!(r#"{{"dimension": "{d}", "score": 4, "rationale": "solid"}}"#))
            .collect();
        format!(
            r#"{{
                "verdict": "pass",
                "confidence": 85,
                "scores": [{}],
                "strengths": ["clear thinking"],
                "redFlags": [],
                "rawFeedback": "Communicates well."
            }}"#,
            scores.join(",")
        )
    }

    #[test]
    fn test_extracts_object_wrapped_in_prose() {
        let text = format!("Sure! Here is my evaluation:\n{}\nHope that helps.", valid_payload());
        let payload = extract_json_object(&text).unwrap();
        assert!(payload.starts_with('{') && payload.ends_with('}'));
        assert!(payload.contains("\"verdict\""));
    }

    #[test]
    fn test_braces_inside_strings_do_not_truncate() {
        let text = r#"{"a": "value with } brace", "b": {"c": 1}}"#;
        assert_eq!(extract_json_object(text).unwrap(), text);
    }

    #[test]
    fn test_no_object_at_all_is_no_json_payload() {
        assert!(matches!(
            extract_json_object("I cannot evaluate this."),
            Err(LlmError::NoJsonPayload)
        ));
    }

    #[test]
    fn test_unbalanced_object_is_no_json_payload() {
        assert!(matches!(
            extract_json_object(r#"{"verdict": "pass""#),
            Err(LlmError::NoJsonPayload)
        ));
    }

    #[test]
    fn test_valid_payload_parses_into_panelist_verdict() {
        let panelist = recruiter();
        let verdict = parse_verdict(&panelist, &valid_payload()).unwrap();
        assert_eq!(verdict.panelist_id, "recruiter");
        assert_eq!(verdict.panelist_name, "Jamie Park");
        assert_eq!(verdict.verdict, Verdict::Pass);
        assert_eq!(verdict.confidence, 85);
        assert_eq!(verdict.scores.len(), 4);
        assert_eq!(verdict.strengths, vec!["clear thinking"]);
        assert!(verdict.red_flags.is_empty());
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let panelist = recruiter();
        let payload = r#"{"verdict": "pass", "confidence": 85}"#;
        let err = parse_verdict(&panelist, payload).unwrap_err();
        assert!(matches!(err, LlmError::MalformedVerdict { .. }));
    }

    #[test]
    fn test_unknown_verdict_label_is_malformed() {
        let panelist = recruiter();
        let payload = valid_payload().replace("\"pass\"", "\"meh\"");
        let err = parse_verdict(&panelist, &payload).unwrap_err();
        assert!(matches!(err, LlmError::MalformedVerdict { .. }));
    }

    #[test]
    fn test_confidence_out_of_range_is_malformed() {
        let panelist = recruiter();
        let payload = valid_payload().replace("\"confidence\": 85", "\"confidence\": 140");
        let err = parse_verdict(&panelist, &payload).unwrap_err();
        assert!(err.to_string().contains("confidence"));
    }

    #[test]
    fn test_dimension_count_mismatch_is_malformed() {
        let panelist = recruiter();
        let payload = r#"{
            "verdict": "pass",
            "confidence": 85,
            "scores": [{"dimension": "Communication Clarity", "score": 4, "rationale": "ok"}],
            "rawFeedback": "short"
        }"#;
        let err = parse_verdict(&panelist, payload).unwrap_err();
        assert!(err.to_string().contains("expected 4 dimension scores"));
    }

    #[test]
    fn test_score_out_of_range_is_malformed() {
        let panelist = recruiter();
        let payload = valid_payload().replace("\"score\": 4", "\"score\": 7");
        let err = parse_verdict(&panelist, &payload).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_missing_strengths_defaults_to_empty_not_failure() {
        // strengths/redFlags may be empty or absent on the wire.
        let panelist = recruiter();
        let payload = valid_payload().replace(r#""strengths": ["clear thinking"],"#, "");
        let verdict = parse_verdict(&panelist, &payload).unwrap();
        assert!(verdict.strengths.is_empty());
    }
}
