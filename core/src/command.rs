use crate::{clock::FrameRate, prefs::Theme};
use serde::{Deserialize, Serialize};

/// Everything a host (UI or the headless runner) can ask the app to do.
/// Variants are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PartyCommand {
    // ── Participants ──────────────────────────────
    SetParticipants { raw: String },
    ClearParticipants,

    // ── Tools ─────────────────────────────────────
    Spin,
    GenerateTeams { count: usize },
    RollDice { count: u32 },
    FlipCoin,

    // ── State ─────────────────────────────────────
    ClearHistory,
    SetTheme { theme: Theme },
    SetAccent { accent: String },
    SetFrameRate { rate: FrameRate },
    Reset,
}
