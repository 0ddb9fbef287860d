//! Extraction of generated text from provider responses

use serde::Deserialize;

use crate::error::GenAiResult;

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Result of reading a text-generation response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Text of the first part of the first candidate
    Extracted(String),
    /// The body did not have the expected shape; carries it verbatim
    Unparsed(String),
}

impl GenerationOutcome {
    /// Reads `candidates[0].content.parts[0].text` out of a raw body
    ///
    /// Any missing or oddly typed level yields `Unparsed` with the body
    /// untouched. A body that is not JSON at all is an error.
    pub fn from_body(body: String) -> GenAiResult<Self> {
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let parsed = GenerateResponse::deserialize(value).unwrap_or_default();

        let text = parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|part| part.text);

        Ok(match text {
            Some(text) => GenerationOutcome::Extracted(text),
            None => GenerationOutcome::Unparsed(body),
        })
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, GenerationOutcome::Extracted(_))
    }

    /// The text to hand back to the caller in either case
    pub fn into_text(self) -> String {
        match self {
            GenerationOutcome::Extracted(text) | GenerationOutcome::Unparsed(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_part_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Bonjour"},{"text":"ignored"}]}},{"content":{"parts":[{"text":"second"}]}}]}"#;

        let outcome = GenerationOutcome::from_body(body.to_string()).unwrap();
        assert_eq!(outcome, GenerationOutcome::Extracted("Bonjour".to_string()));
        assert_eq!(outcome.into_text(), "Bonjour");
    }

    #[test]
    fn test_missing_candidates_returns_raw_body() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;

        let outcome = GenerationOutcome::from_body(body.to_string()).unwrap();
        assert!(!outcome.is_extracted());
        assert_eq!(outcome.into_text(), body);
    }

    #[test]
    fn test_each_missing_level_falls_back() {
        let bodies = [
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#,
            r#"{"candidates":"none"}"#,
            r#"[]"#,
        ];

        for body in bodies {
            let outcome = GenerationOutcome::from_body(body.to_string()).unwrap();
            assert_eq!(outcome, GenerationOutcome::Unparsed(body.to_string()), "body: {body}");
        }
    }

    #[test]
    fn test_non_json_body_is_error() {
        assert!(GenerationOutcome::from_body("<html>502</html>".to_string()).is_err());
    }
}
