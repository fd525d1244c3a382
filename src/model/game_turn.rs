use serde::{Deserialize, Serialize};

/// The structured result of one courtroom exchange.
///
/// `jury_trust` and `game_phase` are passed through exactly as the upstream
/// produced them; nothing clamps them to the documented 0-100 / trial-won-lost
/// ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTurnRecord {
    pub speaker: String,
    pub text: String,
    pub mood: String,
    pub jury_trust: i64,
    pub game_phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}
