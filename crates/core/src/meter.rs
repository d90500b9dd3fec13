//! Special meter - energy earned from placements, banked as special actions

use crate::config::EngineConfig;
use crate::types::{
    ENERGY_COMBO_BONUS, ENERGY_PER_LINE, ENERGY_PER_PLACEMENT, ENERGY_SPIN_BONUS,
};

/// Energy for one lock.
///
/// `combo` is the streak after the lock; the combo bonus needs a streak
/// above 1.
pub fn energy_gain(lines: usize, spin: bool, combo: u32) -> u32 {
    if lines == 0 {
        return ENERGY_PER_PLACEMENT;
    }
    let mut gain = ENERGY_PER_LINE * lines as u32;
    if spin {
        gain += ENERGY_SPIN_BONUS;
    }
    if combo > 1 {
        gain += ENERGY_COMBO_BONUS;
    }
    gain
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialMeter {
    energy: u32,
    count: u8,
    cap: u8,
    per_special: u32,
}

impl SpecialMeter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            energy: 0,
            count: 0,
            cap: config.special_cap,
            per_special: config.energy_per_special.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.energy = 0;
        self.count = 0;
    }

    /// Add the energy for one lock and convert full units into specials.
    ///
    /// Returns how many specials were banked. Units converted while the
    /// bank is full are lost.
    pub fn record_lock(&mut self, lines: usize, spin: bool, combo: u32) -> u8 {
        self.energy = self.energy.saturating_add(energy_gain(lines, spin, combo));

        let mut earned = 0;
        while self.energy >= self.per_special {
            self.energy -= self.per_special;
            if self.count < self.cap {
                self.count += 1;
                earned += 1;
            }
        }
        earned
    }

    /// Spend one special, if any is banked
    pub fn try_consume(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        true
    }

    /// Energy toward the next special
    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// Progress toward the next special, 0..=100
    pub fn energy_percent(&self) -> u8 {
        let percent = u64::from(self.energy) * 100 / u64::from(self.per_special);
        percent.min(100) as u8
    }

    /// Banked specials
    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn cap(&self) -> u8 {
        self.cap
    }

    #[cfg(test)]
    pub(crate) fn set_count(&mut self, count: u8) {
        self.count = count.min(self.cap);
    }
}
