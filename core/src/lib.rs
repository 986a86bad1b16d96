//! spinparty-core: the engine behind a party randomizer.
//!
//! The heart is the wheel (`animator` + `geometry`): a spin picks a random
//! number of turns, eases or decays toward a stop, renders every frame
//! through a `RenderSink`, and resolves the winner from the resting angle
//! with the same convention the renderer draws with. Teams, dice, coin,
//! history, preferences, toasts and confetti hang off `engine::PartyApp`.

pub mod animator;
pub mod clock;
pub mod coin;
pub mod command;
pub mod confetti;
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod notifier;
pub mod participants;
pub mod prefs;
pub mod render;
pub mod rng;
pub mod snapshot;
pub mod store;
pub mod teams;
pub mod types;

pub use animator::{SpinStart, WheelEngine, WheelState};
pub use engine::PartyApp;
pub use error::{PartyError, PartyResult};
pub use event::{PartyEvent, WinnerEvent, WinnerSink};
