//! The wheel engine: Idle → Spinning → Idle.
//!
//! RULES:
//!   - At most one spin at a time. spin() while spinning is a no-op.
//!   - Guards run before any mutation, so a rejected spin leaves the
//!     wheel exactly where it was.
//!   - The participant list is snapshotted at spin(); edits made while
//!     the wheel turns do not affect the frames or the winner.
//!   - A started spin always runs to completion and always resolves.
//!   - Only tick() writes the angle while spinning.

use crate::{
    clock::Scheduler,
    config::{SpinConfig, SpinModel},
    error::{PartyError, PartyResult},
    event::WinnerEvent,
    geometry::{normalize_angle, resolve_winner_index},
    render::RenderSink,
    rng::RandomSource,
    types::{Millis, Radians, SpinId, TAU},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum number of names the wheel will spin for.
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelState {
    /// Cumulative rotation. Unwrapped while spinning, wrapped into
    /// [0, 2π) when a spin ends.
    pub angle:       Radians,
    pub is_spinning: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Motion {
    Eased {
        target:      Radians,
        start_ms:    Millis,
        duration_ms: Millis,
        exponent:    i32,
    },
    Friction {
        velocity:       f64,
        friction:       f64,
        stop_threshold: f64,
    },
}

/// Everything one spin needs. Dropped when the spin resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSession {
    pub spin_id:     SpinId,
    pub start_angle: Radians,
    participants:    Vec<String>,
    motion:          Motion,
}

impl SpinSession {
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Pre-determined stop angle (eased model only).
    pub fn target_angle(&self) -> Option<Radians> {
        match self.motion {
            Motion::Eased { target, .. } => Some(target),
            Motion::Friction { .. } => None,
        }
    }

    /// Current angular velocity (friction model only).
    pub fn velocity(&self) -> Option<f64> {
        match self.motion {
            Motion::Friction { velocity, .. } => Some(velocity),
            Motion::Eased { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinStart {
    Started {
        spin_id:      SpinId,
        start_angle:  Radians,
        target_angle: Option<Radians>,
    },
    /// A spin was already running; nothing changed.
    AlreadySpinning,
}

/// Ease-out curve: 1 - (1 - p)^k, monotonic on [0, 1].
pub fn ease_out(progress: f64, exponent: i32) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(exponent)
}

pub struct WheelEngine<R: RandomSource> {
    state:   WheelState,
    session: Option<SpinSession>,
    rng:     R,
    config:  SpinConfig,
}

impl<R: RandomSource> WheelEngine<R> {
    pub fn new(rng: R, config: SpinConfig) -> PartyResult<Self> {
        config.validate()?;
        Ok(Self {
            state: WheelState::default(),
            session: None,
            rng,
            config,
        })
    }

    /// Start from a given resting angle instead of 0.
    pub fn with_angle(mut self, angle: Radians) -> Self {
        self.state.angle = angle;
        self
    }

    pub fn current_angle(&self) -> Radians {
        self.state.angle
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// Begin a spin. Returns immediately; the winner comes out of tick().
    pub fn spin(
        &mut self,
        participants: &[String],
        now_ms: Millis,
        scheduler: &mut dyn Scheduler,
    ) -> PartyResult<SpinStart> {
        if participants.len() < MIN_PARTICIPANTS {
            return Err(PartyError::InsufficientParticipants { count: participants.len() });
        }
        if self.session.is_some() {
            log::debug!("spin ignored: wheel already spinning");
            return Ok(SpinStart::AlreadySpinning);
        }

        let turns = self.rng.uniform_range(
            self.config.min_turns,
            self.config.min_turns + self.config.turn_spread,
        );
        let rotation = turns * TAU;
        let start_angle = self.state.angle;

        let motion = match self.config.model {
            SpinModel::Eased { duration_ms, exponent } => Motion::Eased {
                target: start_angle + rotation,
                start_ms: now_ms,
                duration_ms,
                exponent,
            },
            SpinModel::Friction { friction, stop_threshold } => Motion::Friction {
                // Geometric decay travels more than (v0 - threshold) / (1 - friction),
                // which with this v0 is rotation + threshold.
                velocity: (rotation + stop_threshold) * (1.0 - friction) + stop_threshold,
                friction,
                stop_threshold,
            },
        };

        let session = SpinSession {
            spin_id: Uuid::new_v4().to_string(),
            start_angle,
            participants: participants.to_vec(),
            motion,
        };
        let started = SpinStart::Started {
            spin_id: session.spin_id.clone(),
            start_angle,
            target_angle: session.target_angle(),
        };

        log::debug!(
            "spin {} started: n={} start={:.4} turns={:.3}",
            session.spin_id,
            participants.len(),
            start_angle,
            turns
        );

        self.session = Some(session);
        self.state.is_spinning = true;
        scheduler.request_tick();
        Ok(started)
    }

    /// Advance one frame. Renders the new angle, then either schedules the
    /// next tick or resolves the winner and returns to Idle.
    pub fn tick(
        &mut self,
        now_ms: Millis,
        scheduler: &mut dyn Scheduler,
        sink: &mut dyn RenderSink,
    ) -> Option<WinnerEvent> {
        let session = self.session.as_mut()?;

        let (angle, finished) = match &mut session.motion {
            Motion::Eased { target, start_ms, duration_ms, exponent } => {
                let elapsed = (now_ms - *start_ms).max(0.0);
                let progress = (elapsed / *duration_ms).min(1.0);
                if progress >= 1.0 {
                    (*target, true)
                } else {
                    let eased = ease_out(progress, *exponent);
                    (session.start_angle + (*target - session.start_angle) * eased, false)
                }
            }
            Motion::Friction { velocity, friction, stop_threshold } => {
                let angle = self.state.angle + *velocity;
                *velocity *= *friction;
                (angle, *velocity < *stop_threshold)
            }
        };

        self.state.angle = angle;
        sink.render(&session.participants, angle);

        if !finished {
            scheduler.request_tick();
            return None;
        }

        let session = self.session.take()?;
        self.state.is_spinning = false;
        self.state.angle = normalize_angle(angle);

        let index = match resolve_winner_index(self.state.angle, session.participants.len()) {
            Ok(index) => index,
            Err(e) => {
                log::warn!("spin {} ended without a winner: {e}", session.spin_id);
                return None;
            }
        };
        let name = session.participants[index].clone();

        log::debug!(
            "spin {} finished: angle={:.4} winner={}#{}",
            session.spin_id,
            self.state.angle,
            name,
            index
        );

        Some(WinnerEvent {
            spin_id: session.spin_id,
            name,
            index,
            final_angle: self.state.angle,
            at_ms: now_ms,
        })
    }

    /// Draw the wheel without advancing it. While spinning, the spin's own
    /// snapshot is drawn, not `live`.
    pub fn redraw(&self, live: &[String], sink: &mut dyn RenderSink) {
        match &self.session {
            Some(session) => sink.render(&session.participants, self.state.angle),
            None => sink.render(live, self.state.angle),
        }
    }
}
