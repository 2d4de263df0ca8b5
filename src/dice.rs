//! The single source of randomness for a roll.
//!
//! Everything nondeterministic (random map, pool draws, flex coin flips)
//! goes through [`Dice`], so tests can script each branch.

use rand::Rng;

pub trait Dice {
    /// Uniform index in `0..len`; callers never pass zero.
    fn index(&mut self, len: usize) -> usize;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

/// [`Dice`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDice<R>(pub R);

impl<R: Rng> Dice for RngDice<R> {
    fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.0.gen::<f64>() < p
    }
}

/// Scripted dice: coin flips come from a queue (false once empty) and
/// every index is the first element, clamped to the pool.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedDice {
    pub flips: std::collections::VecDeque<bool>,
    pub index: usize,
    /// Probabilities asked for, in order
    pub asked: Vec<f64>,
}

#[cfg(test)]
impl ScriptedDice {
    pub fn with_flips(flips: &[bool]) -> Self {
        ScriptedDice {
            flips: flips.iter().copied().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Dice for ScriptedDice {
    fn index(&mut self, len: usize) -> usize {
        self.index.min(len - 1)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.asked.push(p);
        self.flips.pop_front().unwrap_or(false)
    }
}
