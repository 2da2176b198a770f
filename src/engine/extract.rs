//! Structured payload extraction from raw provider text
//!
//! Providers are instructed to answer with a bare JSON object, but in
//! practice they wrap it in prose and markdown fences anyway. The extractor
//! scans for the first *balanced* top-level JSON object - tracking brace
//! depth, string state and escapes - instead of naively pairing the first
//! `{` with the last `}`, which mis-extracts whenever surrounding prose
//! contains brace characters.

use serde_json::Value;

use crate::error::ParseError;

/// Locate and decode the first balanced JSON object in raw text
///
/// Returns `ParseError::Extraction` when no balanced object exists in the
/// input and `ParseError::Decode` when a candidate is found but is not
/// valid JSON.
pub fn extract_json_object(raw: &str) -> Result<Value, ParseError> {
    let candidate = balanced_object_slice(raw).ok_or(ParseError::Extraction {
        scanned: raw.len(),
    })?;

    serde_json::from_str(candidate).map_err(|source| ParseError::Decode { source })
}

/// Find the first balanced `{...}` slice in the text
///
/// Starts at each `{` in turn; a scan that reaches end-of-input without
/// closing moves on to the next opening brace, so prose like "use { wisely"
/// before the real payload does not poison extraction.
fn balanced_object_slice(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = raw[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = scan_balanced(bytes, start) {
            return Some(&raw[start..=end]);
        }
        search_from = start + 1;
    }

    None
}

/// Walk from an opening brace to its matching close, honoring JSON strings
///
/// Returns the byte index of the matching `}`, or `None` if the object
/// never closes.
fn scan_balanced(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_wrapped_in_prose_and_fences() {
        let raw = "Here is your plan:\n```json\n{\"steps\":[1,2,3,4,5],\"estimated_cost\":\"x\",\"timeline\":\"y\",\"recommendations\":[1,2,3,4]}\n```\nEnjoy!";
        let value = extract_json_object(raw).expect("should extract");
        assert_eq!(value["steps"].as_array().unwrap().len(), 5);
        assert_eq!(value["estimated_cost"], "x");
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn bare_object_extracts_unchanged() {
        let value = extract_json_object(r#"{"steps":[]}"#).unwrap();
        assert!(value["steps"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_opening_delimiter_is_extraction_error() {
        let err = extract_json_object("no json here at all").unwrap_err();
        assert!(matches!(err, ParseError::Extraction { .. }));
    }

    #[test]
    fn unterminated_object_is_extraction_error() {
        let err = extract_json_object(r#"prefix {"steps": [1, 2"#).unwrap_err();
        assert!(matches!(err, ParseError::Extraction { .. }));
    }

    #[test]
    fn invalid_json_in_balanced_braces_is_decode_error() {
        let err = extract_json_object("{not json}").unwrap_err();
        assert!(matches!(err, ParseError::Decode { .. }));
    }

    #[test]
    fn trailing_prose_with_braces_does_not_over_capture() {
        // First/last delimiter pairing would swallow the trailing "{braces}"
        // and fail to decode; balanced scanning stops at the real object.
        let raw = r#"Plan: {"steps":[1,2,3,4,5]} and beware of {braces} in prose"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value["steps"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn leading_unclosed_brace_is_skipped() {
        let raw = r#"use { wisely... {"steps":[1,2,3,4,5]}"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value["steps"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn braces_inside_strings_do_not_affect_depth() {
        let raw = r#"{"note":"a } inside a string","steps":[]}"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value["note"], "a } inside a string");
    }

    #[test]
    fn escaped_quotes_inside_strings_are_honored() {
        let raw = r#"{"note":"she said \"}\" loudly"}"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value["note"], r#"she said "}" loudly"#);
    }

    #[test]
    fn nested_objects_extract_as_a_whole() {
        let raw = r#"text {"outer":{"inner":{"deep":1}}} text"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value["outer"]["inner"]["deep"], 1);
    }
}
