//! One toast at a time; a new message replaces the old one.

use crate::{
    event::{WinnerEvent, WinnerSink},
    types::Millis,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub text:       String,
    pub expires_at: Millis,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current:     Option<Toast>,
    duration_ms: Millis,
}

impl Notifier {
    pub fn new(duration_ms: Millis) -> Self {
        Self { current: None, duration_ms }
    }

    pub fn show(&mut self, text: impl Into<String>, now_ms: Millis) {
        let toast = Toast { text: text.into(), expires_at: now_ms + self.duration_ms };
        log::debug!("toast: {}", toast.text);
        self.current = Some(toast);
    }

    /// The visible toast, if it has not expired by `now_ms`.
    pub fn current(&self, now_ms: Millis) -> Option<&Toast> {
        self.current.as_ref().filter(|t| now_ms < t.expires_at)
    }

    /// Drop an expired toast.
    pub fn expire(&mut self, now_ms: Millis) {
        if self.current.as_ref().is_some_and(|t| now_ms >= t.expires_at) {
            self.current = None;
        }
    }
}

impl WinnerSink for Notifier {
    fn on_winner(&mut self, winner: &WinnerEvent) {
        self.show(format!("🏆 Winner: {}", winner.name), winner.at_ms);
    }
}
