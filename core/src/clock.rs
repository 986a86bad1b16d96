//! Frame clock: owns frame count, virtual time, frame rate and the
//! pending-tick flag the animator sets through `Scheduler`.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

/// The host primitive the animator uses to ask for the next frame.
pub trait Scheduler {
    fn request_tick(&mut self);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameClock {
    pub frame:   u64,
    pub now_ms:  Millis,
    pub rate:    FrameRate,
    pending:     bool,
}

impl FrameClock {
    pub fn new(rate: FrameRate) -> Self {
        Self {
            frame: 0,
            now_ms: 0.0,
            rate,
            pending: false,
        }
    }

    /// Advance one frame. Returns the new timestamp.
    pub fn advance(&mut self) -> Millis {
        self.frame += 1;
        self.now_ms += self.rate.frame_interval_ms();
        self.now_ms
    }

    /// Consume the pending request. True when a tick was asked for.
    pub fn take_pending(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn set_rate(&mut self, rate: FrameRate) {
        self.rate = rate;
    }
}

impl Default for FrameClock {
    fn default() -> Self { Self::new(FrameRate::Smooth) }
}

impl Scheduler for FrameClock {
    fn request_tick(&mut self) {
        self.pending = true;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrameRate {
    #[default]
    Smooth,       // 60 frames/s
    Performance,  // 30 frames/s, for slow devices
}

impl FrameRate {
    pub fn frames_per_second(&self) -> u32 {
        match self {
            FrameRate::Smooth      => 60,
            FrameRate::Performance => 30,
        }
    }

    pub fn frame_interval_ms(&self) -> Millis {
        1000.0 / self.frames_per_second() as f64
    }
}
