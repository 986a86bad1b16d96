//! Events emitted by the app. Every operation returns the events it
//! caused; hosts log them, forward them, or ignore them.
//! Variants are only ever appended.

use crate::{
    coin::CoinSide,
    prefs::Theme,
    types::{Millis, Radians, SpinId},
};
use serde::{Deserialize, Serialize};

/// The outcome of one finished spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerEvent {
    pub spin_id:     SpinId,
    pub name:        String,
    pub index:       usize,
    pub final_angle: Radians,
    pub at_ms:       Millis,
}

/// Receives winners for logging or celebration. Fire and forget.
pub trait WinnerSink {
    fn on_winner(&mut self, winner: &WinnerEvent);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartyEvent {
    // ── Wheel ──────────────────────────────────────
    SpinStarted {
        spin_id:      SpinId,
        participants: usize,
        start_angle:  Radians,
        /// None for the friction model, which has no fixed target.
        target_angle: Option<Radians>,
    },
    WinnerSelected(WinnerEvent),

    // ── Other tools ────────────────────────────────
    TeamsGenerated {
        teams: Vec<Vec<String>>,
    },
    DiceRolled {
        faces: Vec<u8>,
        total: u32,
    },
    CoinFlipped {
        side: CoinSide,
    },

    // ── State ──────────────────────────────────────
    ParticipantsUpdated {
        count: usize,
    },
    HistoryCleared,
    ThemeChanged {
        theme: Theme,
    },
    AccentChanged {
        accent: String,
    },
    StateReset,
    /// A change went through in memory but could not be written to the store.
    SaveFailed {
        reason: String,
    },
}

impl PartyEvent {
    /// Stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PartyEvent::SpinStarted { .. }         => "spin_started",
            PartyEvent::WinnerSelected(_)          => "winner_selected",
            PartyEvent::TeamsGenerated { .. }      => "teams_generated",
            PartyEvent::DiceRolled { .. }          => "dice_rolled",
            PartyEvent::CoinFlipped { .. }         => "coin_flipped",
            PartyEvent::ParticipantsUpdated { .. } => "participants_updated",
            PartyEvent::HistoryCleared             => "history_cleared",
            PartyEvent::ThemeChanged { .. }        => "theme_changed",
            PartyEvent::AccentChanged { .. }       => "accent_changed",
            PartyEvent::StateReset                 => "state_reset",
            PartyEvent::SaveFailed { .. }          => "save_failed",
        }
    }
}
