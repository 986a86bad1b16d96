use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => f.write_str("Heads"),
            CoinSide::Tails => f.write_str("Tails"),
        }
    }
}

/// Fair flip.
pub fn flip_coin<R: RandomSource>(rng: &mut R) -> CoinSide {
    if rng.chance(0.5) { CoinSide::Heads } else { CoinSide::Tails }
}
