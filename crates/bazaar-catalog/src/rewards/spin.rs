//! Daily spin wheel.

use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;

use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Free spins granted per calendar day.
pub const SPINS_PER_DAY: u8 = 3;

/// How long the wheel animates before the prize is revealed.
pub const SPIN_DURATION: Duration = Duration::from_secs(5);

/// Coin values of the wheel segments, clockwise from the pointer.
pub const SEGMENTS: [u64; 6] = [5, 10, 20, 50, 0, 100];

const SEGMENT_ANGLE: f64 = 360.0 / SEGMENTS.len() as f64;

/// Result of one spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinOutcome {
    /// Index into [`SEGMENTS`].
    pub segment: usize,
    /// Coins won. May be zero.
    pub prize: u64,
    /// Full turns added on top of the landing angle.
    pub extra_turns: u32,
    /// Cumulative wheel rotation in degrees after the spin.
    pub rotation: f64,
}

/// Wheel position and today's remaining spins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinWheel {
    spins_left: u8,
    #[serde(default)]
    day: Option<NaiveDate>,
    #[serde(default)]
    rotation: f64,
}

impl Default for SpinWheel {
    fn default() -> Self {
        Self {
            spins_left: SPINS_PER_DAY,
            day: None,
            rotation: 0.0,
        }
    }
}

impl SpinWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spins left on `today`.
    pub fn spins_left(&self, today: NaiveDate) -> u8 {
        match self.day {
            Some(day) if day == today => self.spins_left,
            _ => SPINS_PER_DAY,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Spin once. The caller credits [`SpinOutcome::prize`].
    pub fn spin<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<SpinOutcome, CatalogError> {
        if self.day != Some(today) {
            self.day = Some(today);
            self.spins_left = SPINS_PER_DAY;
        }
        if self.spins_left == 0 {
            return Err(CatalogError::NoSpinsLeft);
        }
        self.spins_left -= 1;

        let segment = rng.gen_range(0..SEGMENTS.len());
        let extra_turns = rng.gen_range(5..=9);
        self.rotation = landing_rotation(self.rotation, segment, extra_turns);

        let outcome = SpinOutcome {
            segment,
            prize: SEGMENTS[segment],
            extra_turns,
            rotation: self.rotation,
        };
        tracing::debug!(
            segment,
            prize = outcome.prize,
            spins_left = self.spins_left,
            "wheel spun"
        );
        Ok(outcome)
    }
}

/// Rotation that adds `extra_turns` full turns and stops with the pointer in
/// the middle of `segment`.
fn landing_rotation(current: f64, segment: usize, extra_turns: u32) -> f64 {
    let target = 360.0 - segment as f64 * SEGMENT_ANGLE - SEGMENT_ANGLE / 2.0;
    current + 360.0 * f64::from(extra_turns) + (target - current % 360.0)
}
