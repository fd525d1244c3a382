use serde::{Deserialize, Serialize};

/// One exchange unit in the transcript the client resends on every call.
/// `role` is `"user"` for the player; anything else is game-master output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub text: String,
}
