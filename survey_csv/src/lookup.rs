//! Turning a survey payload into an [`AnswerLookup`].

use log::debug;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::config::*;

/// Returns the response record held in a payload.
///
/// Payloads exported in bulk wrap the responses in a `"responses"` array. Only
/// the first response is used. Any other payload is assumed to be a response
/// record already; its shape is checked later by [`build_answer_lookup`].
pub fn get_response(payload: &JSValue) -> &JSValue {
    match payload.get("responses").and_then(|r| r.as_array()) {
        Some(responses) if !responses.is_empty() => {
            debug!(
                "get_response: {} responses in payload, using the first one",
                responses.len()
            );
            &responses[0]
        }
        _ => payload,
    }
}

/// Builds the lookup of all the answers of a response.
///
/// Answers are processed in order: if the same question appears several times,
/// the last answer wins. The identifier and the timestamp of the response are
/// added under the keys [`RESPONSE_ID_KEY`] and [`DATETIME_KEY`].
pub fn build_answer_lookup(response: &JSValue) -> Result<AnswerLookup, SurveyError> {
    let obj = response.as_object().ok_or(SurveyError::NotAnObject {
        field: "response".to_string(),
    })?;

    let answers = required_field(obj, "answers", "answers")?
        .as_array()
        .ok_or(SurveyError::WrongType {
            field: "answers".to_string(),
            expected: "an array",
        })?;

    let mut lookup = AnswerLookup::new();
    for (idx, item) in answers.iter().enumerate() {
        let item_name = format!("answers[{}]", idx);
        let item_obj = item.as_object().ok_or(SurveyError::NotAnObject {
            field: item_name.clone(),
        })?;
        let question = stringify(required_field(
            item_obj,
            "question",
            &format!("{}.question", item_name),
        )?);
        let answer = stringify(required_field(
            item_obj,
            "answer",
            &format!("{}.answer", item_name),
        )?);
        if let Some(previous) = lookup.insert(&question, &answer) {
            debug!(
                "build_answer_lookup: question {:?} answered again, replacing {:?} with {:?}",
                question, previous, answer
            );
        }
    }

    let response_id = stringify(required_field(obj, "response_id", "response_id")?);
    let datetime = stringify(required_field(obj, "datetime", "datetime")?);
    lookup.insert(RESPONSE_ID_KEY, &response_id);
    lookup.insert(DATETIME_KEY, &datetime);

    debug!(
        "build_answer_lookup: response {}: {} entries",
        response_id,
        lookup.len()
    );
    Ok(lookup)
}

/// The text of a JSON value, as it should appear in a CSV cell.
///
/// Strings are taken verbatim, `null` is empty, booleans are `True` or `False`
/// and everything else uses its compact JSON notation.
pub fn stringify(value: &JSValue) -> String {
    match value {
        JSValue::String(s) => s.clone(),
        JSValue::Null => "".to_string(),
        JSValue::Bool(true) => "True".to_string(),
        JSValue::Bool(false) => "False".to_string(),
        x => x.to_string(),
    }
}

fn required_field<'a>(
    obj: &'a JSMap<String, JSValue>,
    key: &str,
    field: &str,
) -> Result<&'a JSValue, SurveyError> {
    obj.get(key).ok_or_else(|| SurveyError::MissingField {
        field: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_response_uses_first_wrapped_response() {
        let payload = json!({"responses": [{"response_id": 1}, {"response_id": 2}]});
        assert_eq!(get_response(&payload), &json!({"response_id": 1}));
    }

    #[test]
    fn get_response_bare_payload() {
        let payload = json!({"response_id": 3, "datetime": "x", "answers": []});
        assert_eq!(get_response(&payload), &payload);
    }

    #[test]
    fn get_response_empty_container_falls_back_to_payload() {
        let payload = json!({"responses": []});
        assert_eq!(get_response(&payload), &payload);
    }

    #[test]
    fn lookup_contains_synthetic_keys_without_answers() {
        let response = json!({"response_id": 42, "datetime": "2024-01-01T00:00:00Z", "answers": []});
        let lookup = build_answer_lookup(&response).unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(RESPONSE_ID_KEY), Some("42"));
        assert_eq!(lookup.get(DATETIME_KEY), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn lookup_last_answer_wins() {
        let response = json!({
            "response_id": "abc",
            "datetime": "now",
            "answers": [
                {"question": "Color", "answer": "red"},
                {"question": "Size", "answer": "L"},
                {"question": "Color", "answer": "blue"},
            ]
        });
        let lookup = build_answer_lookup(&response).unwrap();
        assert_eq!(lookup.get("Color"), Some("blue"));
        assert_eq!(lookup.get("Size"), Some("L"));
        assert_eq!(lookup.get(RESPONSE_ID_KEY), Some("abc"));
    }

    #[test]
    fn lookup_synthetic_keys_override_answers() {
        let response = json!({
            "response_id": 7,
            "datetime": "t",
            "answers": [{"question": "response_id", "answer": "fake"}]
        });
        let lookup = build_answer_lookup(&response).unwrap();
        assert_eq!(lookup.get(RESPONSE_ID_KEY), Some("7"));
    }

    #[test]
    fn lookup_stringifies_non_string_answers() {
        let response = json!({
            "response_id": 1,
            "datetime": "t",
            "answers": [
                {"question": "Age", "answer": 30},
                {"question": "Agreed", "answer": true},
                {"question": "Subscribed", "answer": false},
                {"question": "Notes", "answer": null},
            ]
        });
        let lookup = build_answer_lookup(&response).unwrap();
        assert_eq!(lookup.get("Age"), Some("30"));
        assert_eq!(lookup.get("Agreed"), Some("True"));
        assert_eq!(lookup.get("Subscribed"), Some("False"));
        assert_eq!(lookup.get("Notes"), Some(""));
    }

    #[test]
    fn lookup_missing_fields() {
        let no_answers = json!({"response_id": 1, "datetime": "t"});
        assert_eq!(
            build_answer_lookup(&no_answers),
            Err(SurveyError::MissingField {
                field: "answers".to_string()
            })
        );

        let no_id = json!({"datetime": "t", "answers": []});
        assert_eq!(
            build_answer_lookup(&no_id),
            Err(SurveyError::MissingField {
                field: "response_id".to_string()
            })
        );

        let no_datetime = json!({"response_id": 1, "answers": []});
        assert_eq!(
            build_answer_lookup(&no_datetime),
            Err(SurveyError::MissingField {
                field: "datetime".to_string()
            })
        );

        let no_question = json!({"response_id": 1, "datetime": "t", "answers": [{"answer": "x"}]});
        assert_eq!(
            build_answer_lookup(&no_question),
            Err(SurveyError::MissingField {
                field: "answers[0].question".to_string()
            })
        );
    }

    #[test]
    fn lookup_wrong_shapes() {
        assert_eq!(
            build_answer_lookup(&json!([1, 2])),
            Err(SurveyError::NotAnObject {
                field: "response".to_string()
            })
        );
        let answers_not_array = json!({"response_id": 1, "datetime": "t", "answers": "yes"});
        assert!(matches!(
            build_answer_lookup(&answers_not_array),
            Err(SurveyError::WrongType { .. })
        ));
    }
}
