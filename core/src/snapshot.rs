//! The persisted blob: everything the app restores on start.
//!
//! Every field is optional on load so older or partial blobs still work.

use crate::{history::HistoryEntry, prefs::Theme};
use serde::{Deserialize, Serialize};

/// Storage key the blob lives under.
pub const STATE_KEY: &str = "randomizer_data";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedState {
    /// Raw participant text, one name per line.
    pub participants: String,
    pub history:      Vec<HistoryEntry>,
    pub theme:        Theme,
    pub accent:       Option<String>,
}
