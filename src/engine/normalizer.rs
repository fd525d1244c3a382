use serde_json::Value;

use crate::engine::fallback::scripted_record;
use crate::engine::provider::ProviderError;
use crate::model::game_turn::GameTurnRecord;

/// Outcome of one exchange. The two branches make the always-succeeds
/// contract explicit: either the provider's parsed object or a scripted
/// record, never an error.
#[derive(Debug)]
pub enum ChatOutcome {
    /// Parsed provider output, passed through without schema validation.
    Generated(Value),
    /// Deterministic scripted record from the fallback generator.
    Scripted(GameTurnRecord),
}

impl ChatOutcome {
    pub fn is_scripted(&self) -> bool {
        matches!(self, ChatOutcome::Scripted(_))
    }

    pub fn into_value(self) -> Value {
        match self {
            ChatOutcome::Generated(value) => value,
            // The scripted record always serializes; it is plain data.
            ChatOutcome::Scripted(record) => {
                serde_json::to_value(record).unwrap_or_else(|_| Value::Null)
            }
        }
    }
}

/// Turn the provider call's result into exactly one record. Any upstream or
/// parse failure is absorbed here and answered from the original player
/// message; partial provider output is discarded, not patched.
pub fn normalize(reply: Result<String, ProviderError>, message: &str) -> ChatOutcome {
    match reply {
        Ok(raw) => match extract_record(&raw) {
            Some(value) => ChatOutcome::Generated(value),
            None => {
                tracing::warn!("provider reply was not a JSON object; switching to the scripted bench");
                ChatOutcome::Scripted(scripted_record(message))
            }
        },
        Err(err) => {
            tracing::warn!("provider call failed ({err}); switching to the scripted bench");
            ChatOutcome::Scripted(scripted_record(message))
        }
    }
}

/// Scrub fencing and surrounding prose, then parse.
///
/// Purely textual first: drop every ```json / ``` marker and trim. Then cut
/// from the first `{` to the last `}` to shed prose the model wrapped around
/// the object; if either brace is missing the text is parsed as-is.
fn extract_record(raw: &str) -> Option<Value> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let mut working = cleaned.trim();

    if let (Some(first), Some(last)) = (working.find('{'), working.rfind('}')) {
        if first <= last {
            working = &working[first..=last];
        }
    }

    serde_json::from_str::<Value>(working)
        .ok()
        .filter(Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const JUDGE_REPLY: &str =
        r#"{"speaker":"Judge","text":"开庭","mood":"neutral","jury_trust":50,"game_phase":"trial"}"#;

    #[test]
    fn fenced_and_padded_reply_parses_like_the_bare_payload() {
        let bare = extract_record(JUDGE_REPLY).expect("bare payload parses");
        let wrapped = format!("Here is the ruling:\n```json\n{JUDGE_REPLY}\n```\nLet me know!");
        let fenced = extract_record(&wrapped).expect("wrapped payload parses");
        assert_eq!(bare, fenced);
    }

    #[test]
    fn prose_around_braces_is_discarded() {
        let value = extract_record("The court says {\"speaker\":\"Judge\"} thank you").unwrap();
        assert_eq!(value, json!({"speaker": "Judge"}));
    }

    #[test]
    fn reply_without_braces_is_rejected() {
        assert!(extract_record("I cannot answer that.").is_none());
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(extract_record("42").is_none());
        assert!(extract_record("[1,2,3]").is_none());
        assert!(extract_record("\"just a string\"").is_none());
    }

    #[test]
    fn reversed_braces_fall_through_to_rejection() {
        assert!(extract_record("} nonsense {").is_none());
    }

    #[test]
    fn provider_error_never_escapes() {
        let outcome = normalize(Err(ProviderError::EmptyReply), "证人是不是没戴眼镜？");
        match outcome {
            ChatOutcome::Scripted(record) => {
                assert_eq!(record.speaker, "Witness");
                assert_eq!(record.jury_trust, 75);
            }
            ChatOutcome::Generated(_) => panic!("error input must take the scripted branch"),
        }
    }

    #[test]
    fn malformed_json_takes_the_scripted_branch() {
        let outcome = normalize(Ok("```json\n{not json at all\n```".to_string()), "你好");
        match outcome {
            ChatOutcome::Scripted(record) => assert_eq!(record.speaker, "Judge"),
            ChatOutcome::Generated(_) => panic!("malformed reply must take the scripted branch"),
        }
    }

    #[test]
    fn parsed_object_passes_through_unchanged() {
        let outcome = normalize(Ok(format!("```json\n{JUDGE_REPLY}\n```")), "你好");
        match outcome {
            ChatOutcome::Generated(value) => {
                assert_eq!(value["speaker"], "Judge");
                assert_eq!(value["jury_trust"], 50);
            }
            ChatOutcome::Scripted(_) => panic!("valid reply must not be replaced"),
        }
    }

    #[test]
    fn unvalidated_fields_pass_through() {
        // jury_trust out of range and an unknown phase are upstream's call.
        let raw = r#"{"speaker":"Judge","jury_trust":999,"game_phase":"intermission"}"#;
        let outcome = normalize(Ok(raw.to_string()), "whatever");
        match outcome {
            ChatOutcome::Generated(value) => {
                assert_eq!(value["jury_trust"], 999);
                assert_eq!(value["game_phase"], "intermission");
            }
            ChatOutcome::Scripted(_) => panic!("valid object must pass through"),
        }
    }

    #[test]
    fn scripted_outcome_serializes_to_a_record_shaped_object() {
        let outcome = normalize(Err(ProviderError::EmptyReply), "");
        let value = outcome.into_value();
        assert!(value.is_object());
        assert!(value.get("speaker").is_some());
        assert!(value.get("mood").is_some());
        assert!(value.get("game_phase").is_some());
    }
}
