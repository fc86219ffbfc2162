//! Response recovery: pulls the analysis JSON object out of raw model text.
//!
//! Models wrap JSON in prose or markdown fences despite being told not to, and
//! long completions get cut off at the output-token ceiling. Recovery:
//!
//! 1. trim, then drop every ``` fence marker (with or without a language tag);
//! 2. slice from the first `{` to the last `}`;
//! 3. parse strictly and require `overallScore` and `atsScore`;
//! 4. on failure, if the slice has `n` more `{` than `}`, append `n` closing
//!    braces and try step 3 once more.
//!
//! Only missing trailing braces are repaired. Truncation inside strings or
//! arrays, or dangling commas, is reported as `MalformedJson`.

use serde_json::{Map, Value};
use thiserror::Error;

const FENCE: &str = "```";

/// Keys an object must carry before it is accepted as an analysis.
pub const MANDATORY_KEYS: [&str; 2] = ["overallScore", "atsScore"];

/// Max characters of the raw response kept for diagnostics.
pub const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("no JSON object found in model response")]
    NoJsonFound { preview: String },

    #[error("model response is not a complete analysis object")]
    MalformedJson { preview: String },
}

impl RecoveryError {
    pub fn kind(&self) -> &'static str {
        match self {
            RecoveryError::NoJsonFound { .. } => "no_json_found",
            RecoveryError::MalformedJson { .. } => "malformed_json",
        }
    }

    pub fn preview(&self) -> &str {
        match self {
            RecoveryError::NoJsonFound { preview } | RecoveryError::MalformedJson { preview } => {
                preview
            }
        }
    }
}

/// A recovered analysis object.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub object: Map<String, Value>,
    /// True when closing braces had to be appended to parse it.
    pub repaired: bool,
}

pub fn recover_analysis_json(raw: &str) -> Result<Recovered, RecoveryError> {
    let cleaned = strip_code_fences(raw.trim());

    let (start, end) = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => {
            return Err(RecoveryError::NoJsonFound {
                preview: preview(raw),
            })
        }
    };
    let candidate = &cleaned[start..=end];

    if let Some(object) = parse_analysis_object(candidate) {
        return Ok(Recovered {
            object,
            repaired: false,
        });
    }

    let missing = brace_deficit(candidate);
    if missing > 0 {
        let mut patched = String::with_capacity(candidate.len() + missing);
        patched.push_str(candidate);
        patched.extend(std::iter::repeat('}').take(missing));

        if let Some(object) = parse_analysis_object(&patched) {
            return Ok(Recovered {
                object,
                repaired: true,
            });
        }
    }

    Err(RecoveryError::MalformedJson {
        preview: preview(raw),
    })
}

/// Removes every fence marker plus an immediately following language tag.
fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(FENCE) {
        out.push_str(&rest[..idx]);
        rest = rest[idx + FENCE.len()..]
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim_start();
    }
    out.push_str(rest);
    out
}

/// Strict parse; rejects non-objects and objects missing a mandatory key.
fn parse_analysis_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) if has_mandatory_keys(&object) => Some(object),
        _ => None,
    }
}

fn has_mandatory_keys(object: &Map<String, Value>) -> bool {
    MANDATORY_KEYS
        .iter()
        .all(|key| object.get(*key).is_some_and(|v| !v.is_null()))
}

fn brace_deficit(candidate: &str) -> usize {
    let opens = candidate.matches('{').count();
    let closes = candidate.matches('}').count();
    opens.saturating_sub(closes)
}

fn preview(raw: &str) -> String {
    raw.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_analysis() -> Value {
        json!({
            "overallScore": 78,
            "atsScore": 81,
            "contentScore": 74,
            "strengths": [
                {"title": "Quantified impact", "description": "Uses numbers", "score": 88}
            ],
            "issues": [
                {"title": "Long summary", "description": "Five lines", "severity": "warning"}
            ],
            "keywordAnalysis": {
                "presentKeywords": ["Rust", "SQL"],
                "missingKeywords": [],
                "keywordDensity": 62
            },
            "sections": {
                "skills": {"present": true, "score": 90, "feedback": "Good {coverage}"}
            }
        })
    }

    /// Nested so the serialized text ends in four consecutive closing braces.
    fn deeply_closed_analysis() -> Value {
        json!({
            "overallScore": 70,
            "atsScore": 65,
            "sections": {
                "experience": {
                    "present": true,
                    "tenure": {"years": 4}
                }
            }
        })
    }

    #[test]
    fn test_plain_object_is_not_marked_repaired() {
        let raw = sample_analysis().to_string();
        let recovered = recover_analysis_json(&raw).unwrap();
        assert!(!recovered.repaired);
        assert_eq!(Value::Object(recovered.object), sample_analysis());
    }

    #[test]
    fn test_wrapped_object_round_trips() {
        let original = sample_analysis();
        let body = serde_json::to_string_pretty(&original).unwrap();
        let wrappings = [
            format!("```json\n{body}\n```"),
            format!("```\n{body}\n```"),
            format!("Here is the analysis you asked for:\n\n{body}\n\nLet me know!"),
            format!("Sure.\n```json\n{body}\n```\nHope this helps."),
            format!("  \n```JSON{body}```  "),
        ];
        for wrapped in wrappings {
            let recovered = recover_analysis_json(&wrapped).unwrap();
            assert_eq!(Value::Object(recovered.object), original, "input: {wrapped}");
        }
    }

    #[test]
    fn test_strip_code_fences_handles_inner_fences() {
        let text = "Intro\n```json\n{\"a\": 1}\n```\nOutro";
        assert_eq!(strip_code_fences(text), "Intro\n{\"a\": 1}\nOutro");
    }

    #[test]
    fn test_repairs_up_to_three_missing_trailing_braces() {
        let original = deeply_closed_analysis();
        let serialized = original.to_string();
        assert!(serialized.ends_with("}}}}"));

        for n in 1..=3 {
            let truncated = &serialized[..serialized.len() - n];
            let recovered = recover_analysis_json(truncated)
                .unwrap_or_else(|e| panic!("n={n} failed to recover: {e}"));
            assert!(recovered.repaired, "n={n} should be tagged repaired");
            assert_eq!(Value::Object(recovered.object), original, "n={n}");
        }
    }

    #[test]
    fn test_repair_works_inside_fences() {
        let serialized = deeply_closed_analysis().to_string();
        let truncated = &serialized[..serialized.len() - 2];
        let raw = format!("```json\n{truncated}\n```");
        let recovered = recover_analysis_json(&raw).unwrap();
        assert!(recovered.repaired);
        assert_eq!(recovered.object["overallScore"], json!(70));
    }

    #[test]
    fn test_brace_missing_inside_array_fails_instead_of_guessing() {
        let raw = r#"{"overallScore":70,"atsScore":65,"strengths":[{"title":"A"},{"title":"B"]}"#;
        let err = recover_analysis_json(raw).unwrap_err();
        assert!(matches!(err, RecoveryError::MalformedJson { .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_mandatory_key_is_malformed() {
        let raw = r#"{"overallScore": 70, "contentScore": 50}"#;
        let err = recover_analysis_json(raw).unwrap_err();
        assert_eq!(err.kind(), "malformed_json");
    }

    #[test]
    fn test_null_mandatory_key_is_malformed() {
        let raw = r#"{"overallScore": null, "atsScore": 65}"#;
        assert!(matches!(
            recover_analysis_json(raw),
            Err(RecoveryError::MalformedJson { .. })
        ));
    }

    #[test]
    fn test_unbalanced_but_unrepairable_is_malformed() {
        // The dangling comma inside the array survives brace repair.
        let raw = r#"{"overallScore":70,"atsScore":65,"skills":["Rust",],"sections":{"a":{"b":1}"#;
        assert!(matches!(
            recover_analysis_json(raw),
            Err(RecoveryError::MalformedJson { .. })
        ));
    }

    #[test]
    fn test_no_braces_is_no_json_found() {
        let err = recover_analysis_json("I'm sorry, I can't analyze this resume.").unwrap_err();
        assert!(matches!(err, RecoveryError::NoJsonFound { .. }));
        assert_eq!(err.preview(), "I'm sorry, I can't analyze this resume.");
    }

    #[test]
    fn test_close_before_open_is_no_json_found() {
        let err = recover_analysis_json("} nothing here {").unwrap_err();
        assert_eq!(err.kind(), "no_json_found");
    }

    #[test]
    fn test_preview_is_bounded_and_char_safe() {
        let raw = format!("{}{{\"overallScore\":", "é".repeat(2 * PREVIEW_CHARS));
        let err = recover_analysis_json(&raw).unwrap_err();
        assert_eq!(err.preview().chars().count(), PREVIEW_CHARS);
    }
}
