use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

pub const DIE_FACES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub faces: Vec<u8>,
    pub total: u32,
}

impl DiceRoll {
    pub fn quantity(&self) -> usize {
        self.faces.len()
    }

    /// History line, e.g. "Dice (3): Total 11".
    pub fn summary(&self) -> String {
        format!("Dice ({}): Total {}", self.quantity(), self.total)
    }
}

/// Roll `quantity` six-sided dice. Quantity is clamped to 1..=max.
pub fn roll_dice<R: RandomSource>(quantity: u32, max: u32, rng: &mut R) -> DiceRoll {
    let quantity = quantity.clamp(1, max.max(1));
    let faces: Vec<u8> = (0..quantity)
        .map(|_| rng.below(DIE_FACES) as u8 + 1)
        .collect();
    let total = faces.iter().map(|&f| f as u32).sum();
    DiceRoll { faces, total }
}
