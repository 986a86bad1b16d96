use crate::{
    clock::FrameRate,
    error::{PartyError, PartyResult},
    types::Millis,
};
use serde::{Deserialize, Serialize};

/// How the wheel decelerates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpinModel {
    /// Time-based: angle = start + R * (1 - (1-p)^exponent).
    Eased { duration_ms: Millis, exponent: i32 },
    /// Physics: angle += v; v *= friction; stop once v < stop_threshold.
    Friction { friction: f64, stop_threshold: f64 },
}

impl Default for SpinModel {
    fn default() -> Self {
        SpinModel::Eased { duration_ms: 4000.0, exponent: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpinConfig {
    /// Minimum extra full turns per spin.
    pub min_turns:   f64,
    /// Random extra turns on top of min_turns, drawn from [0, turn_spread).
    pub turn_spread: f64,
    pub model:       SpinModel,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_turns:   8.0,
            turn_spread: 8.0,
            model:       SpinModel::default(),
        }
    }
}

impl SpinConfig {
    pub fn friction() -> Self {
        Self {
            model: SpinModel::Friction { friction: 0.985, stop_threshold: 1e-3 },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> PartyResult<()> {
        if !(self.min_turns >= 1.0) {
            return Err(PartyError::invalid(format!(
                "min_turns must be at least 1, got {}", self.min_turns
            )));
        }
        if !(self.turn_spread >= 0.0) {
            return Err(PartyError::invalid("turn_spread must be non-negative"));
        }
        match self.model {
            SpinModel::Eased { duration_ms, exponent } => {
                if !(duration_ms > 0.0) {
                    return Err(PartyError::invalid("spin duration must be positive"));
                }
                if !(1..=8).contains(&exponent) {
                    return Err(PartyError::invalid(format!(
                        "easing exponent must be in 1..=8, got {exponent}"
                    )));
                }
            }
            SpinModel::Friction { friction, stop_threshold } => {
                if !(friction > 0.0 && friction < 1.0) {
                    return Err(PartyError::invalid(format!(
                        "friction must be in (0, 1), got {friction}"
                    )));
                }
                if !(stop_threshold > 0.0) {
                    return Err(PartyError::invalid("stop_threshold must be positive"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfettiConfig {
    pub count:  usize,
    pub width:  f64,
    pub height: f64,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self { count: 80, width: 1280.0, height: 720.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartyConfig {
    pub wheel:         SpinConfig,
    pub history_limit: usize,
    pub max_dice:      u32,
    pub toast_ms:      Millis,
    pub frame_rate:    FrameRate,
    pub confetti:      ConfettiConfig,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            wheel:         SpinConfig::default(),
            history_limit: 20,
            max_dice:      25,
            toast_ms:      3000.0,
            frame_rate:    FrameRate::Smooth,
            confetti:      ConfettiConfig::default(),
        }
    }
}

impl PartyConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PartyConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PartyResult<()> {
        self.wheel.validate()?;
        if self.history_limit == 0 {
            return Err(PartyError::invalid("history_limit must be positive"));
        }
        if self.max_dice == 0 {
            return Err(PartyError::invalid("max_dice must be positive"));
        }
        Ok(())
    }
}
