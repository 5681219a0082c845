//! Injected randomness for shop rolls and contested burns
//!
//! The core never touches OS entropy. A session owns one `ShopRng` and every
//! draw goes through it, so a seed replays the whole run.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Trait for random number generation in shop and pool draws
pub trait ShopRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Index drawn with probability proportional to its weight.
    ///
    /// Uses one draw. `None` when every weight is zero.
    fn pick_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.gen_range(total as usize) as u32;
        for (i, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return Some(i);
            }
            roll -= weight;
        }
        None
    }
}

impl<R: ShopRng + ?Sized> ShopRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// XorShift32 generator, seeded per session
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Fold a 64-bit seed into the 32-bit state. The state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }
}

impl ShopRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
