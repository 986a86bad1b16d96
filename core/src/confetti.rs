//! Confetti celebration: particles fall from above the viewport until
//! they drop off the bottom.

use crate::{
    config::ConfettiConfig,
    event::{WinnerEvent, WinnerSink},
    rng::{RandomSource, SeededRandom},
};
use serde::{Deserialize, Serialize};

const SPAWN_Y: f64 = -20.0;
const TILT_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x:      f64,
    pub y:      f64,
    /// Stroke width.
    pub radius: f64,
    /// Fall speed per frame.
    pub speed:  f64,
    pub hue:    f64,
    pub tilt:   f64,
}

pub struct Celebration {
    particles: Vec<Particle>,
    config:    ConfettiConfig,
    rng:       SeededRandom,
}

impl Celebration {
    pub fn new(config: ConfettiConfig, rng: SeededRandom) -> Self {
        Self { particles: Vec::new(), config, rng }
    }

    pub fn fire(&mut self) {
        let width = self.config.width;
        let rng = &mut self.rng;
        self.particles.extend((0..self.config.count).map(|_| Particle {
            x:      rng.uniform_range(0.0, width),
            y:      SPAWN_Y,
            radius: rng.uniform_range(2.0, 6.0),
            speed:  rng.uniform_range(2.0, 6.0),
            hue:    rng.uniform_range(0.0, 360.0),
            tilt:   rng.uniform_range(0.0, 10.0),
        }));
    }

    /// One animation frame.
    pub fn step(&mut self) {
        let height = self.config.height;
        for p in &mut self.particles {
            p.y += p.speed;
            p.tilt += TILT_STEP;
        }
        self.particles.retain(|p| p.y <= height);
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl WinnerSink for Celebration {
    fn on_winner(&mut self, _winner: &WinnerEvent) {
        self.fire();
    }
}
