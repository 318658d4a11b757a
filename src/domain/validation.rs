//! provider 응답(JSON 텍스트)을 검증된 `ReviewResult`로 변환하는 경계.
//!
//! 하나의 제안이라도 형식이 틀리면 결과 전체를 거부한다(부분 수용 없음).

use serde_json::{Map, Value};

use crate::domain::error::MalformedReason;
use crate::domain::review::{Category, ReviewResult, Suggestion};

pub fn validate_response(raw: &str) -> Result<ReviewResult, MalformedReason> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(|_| MalformedReason::NotJson)?;
    let Value::Object(root) = value else {
        return Err(MalformedReason::NotJson);
    };

    let summary = root
        .get("summary")
        .and_then(Value::as_str)
        .ok_or(MalformedReason::MissingField("summary"))?;
    let items = root
        .get("suggestions")
        .and_then(Value::as_array)
        .ok_or(MalformedReason::MissingField("suggestions"))?;

    let suggestions = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_suggestion(item)
                .map_err(|detail| MalformedReason::InvalidSuggestion { index, detail })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReviewResult {
        summary: summary.to_string(),
        suggestions,
    })
}

fn parse_suggestion(item: &Value) -> Result<Suggestion, String> {
    let Some(obj) = item.as_object() else {
        return Err("not an object".to_string());
    };

    let severity = required(obj, "severity")?
        .as_u64()
        .filter(|v| (1..=5).contains(v))
        .ok_or_else(|| "severity must be an integer between 1 and 5".to_string())?;

    let category = string_field(obj, "category")?.parse::<Category>()?;

    let line_number = required(obj, "lineNumber")?
        .as_u64()
        .ok_or_else(|| "lineNumber must be a non-negative integer".to_string())?;

    Ok(Suggestion {
        issue: string_field(obj, "issue")?.to_string(),
        severity: severity as u8,
        category,
        file_path: string_field(obj, "filePath")?.to_string(),
        line_number,
        code_snippet: string_field(obj, "codeSnippet")?.to_string(),
        recommendation: string_field(obj, "recommendation")?.to_string(),
    })
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, String> {
    obj.get(key).ok_or_else(|| format!("missing field: {key}"))
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    required(obj, key)?
        .as_str()
        .ok_or_else(|| format!("{key} must be a string"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn suggestion() -> Value {
        json!({
            "issue": "Hardcoded debug statement",
            "severity": 4,
            "category": "style",
            "filePath": "x.js",
            "lineNumber": 1,
            "codeSnippet": "console.log('secret')",
            "recommendation": "Remove before merging"
        })
    }

    fn response_with(suggestions: Vec<Value>) -> String {
        json!({ "summary": "Adds a debug log", "suggestions": suggestions }).to_string()
    }

    #[test]
    fn accepts_well_formed_response() {
        let result = validate_response(&response_with(vec![suggestion()])).unwrap();
        assert_eq!(result.summary, "Adds a debug log");
        assert_eq!(result.suggestions.len(), 1);
        let s = &result.suggestions[0];
        assert_eq!(s.category, Category::Style);
        assert_eq!(s.severity, 4);
        assert_eq!(s.line_number, 1);
        assert_eq!(s.file_path, "x.js");
    }

    #[test]
    fn empty_suggestions_mean_nothing_to_report() {
        let result = validate_response(&response_with(vec![])).unwrap();
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn keeps_provider_order() {
        let mut second = suggestion();
        second["issue"] = json!("second");
        second["severity"] = json!(1);
        let result = validate_response(&response_with(vec![suggestion(), second])).unwrap();
        assert_eq!(result.suggestions[0].issue, "Hardcoded debug statement");
        assert_eq!(result.suggestions[1].issue, "second");
    }

    #[test]
    fn rejects_non_json_text() {
        assert_eq!(
            validate_response("Sure! Here is my review:"),
            Err(MalformedReason::NotJson)
        );
        assert_eq!(
            validate_response("```json\n{\"summary\":\"x\",\"suggestions\":[]}\n```"),
            Err(MalformedReason::NotJson)
        );
        assert_eq!(validate_response("[1, 2]"), Err(MalformedReason::NotJson));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let raw = format!("\n  {}  \n", response_with(vec![]));
        assert!(validate_response(&raw).is_ok());
    }

    #[test]
    fn rejects_missing_top_level_fields() {
        assert_eq!(
            validate_response(r#"{"suggestions": []}"#),
            Err(MalformedReason::MissingField("summary"))
        );
        assert_eq!(
            validate_response(r#"{"summary": "ok"}"#),
            Err(MalformedReason::MissingField("suggestions"))
        );
        assert_eq!(
            validate_response(r#"{"summary": 3, "suggestions": []}"#),
            Err(MalformedReason::MissingField("summary"))
        );
    }

    #[test]
    fn one_incomplete_suggestion_rejects_everything() {
        for field in [
            "issue",
            "severity",
            "category",
            "filePath",
            "lineNumber",
            "codeSnippet",
            "recommendation",
        ] {
            let mut broken = suggestion();
            broken.as_object_mut().unwrap().remove(field);
            let err = validate_response(&response_with(vec![suggestion(), broken])).unwrap_err();
            match err {
                MalformedReason::InvalidSuggestion { index, detail } => {
                    assert_eq!(index, 1);
                    assert!(detail.contains(field), "{detail}");
                }
                other => panic!("unexpected reason: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_out_of_range_or_non_integer_severity() {
        for bad in [json!(0), json!(6), json!(2.5), json!("3"), json!(-1)] {
            let mut s = suggestion();
            s["severity"] = bad;
            assert!(matches!(
                validate_response(&response_with(vec![s])),
                Err(MalformedReason::InvalidSuggestion { index: 0, .. })
            ));
        }
    }

    #[test]
    fn rejects_unknown_category_and_negative_line() {
        let mut s = suggestion();
        s["category"] = json!("vibes");
        assert!(validate_response(&response_with(vec![s])).is_err());

        let mut s = suggestion();
        s["lineNumber"] = json!(-3);
        assert!(validate_response(&response_with(vec![s])).is_err());
    }

    #[test]
    fn accepts_empty_snippet_and_mixed_case_category() {
        let mut s = suggestion();
        s["codeSnippet"] = json!("");
        s["category"] = json!("Security");
        let result = validate_response(&response_with(vec![s])).unwrap();
        assert_eq!(result.suggestions[0].category, Category::Security);
        assert!(result.suggestions[0].code_snippet.is_empty());
    }
}
