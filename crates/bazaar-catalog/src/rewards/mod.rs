//! Coins, the daily spin wheel and redeemable rewards.
//!
//! [`Rewards`] bundles the wallet and wheel so they can be saved under one
//! store key.

mod redeem;
mod spin;
mod wallet;

pub use redeem::{redeem_option, Progress, RedeemOption, FIRST_TARGET, REDEEM_OPTIONS};
pub use spin::{SpinOutcome, SpinWheel, SEGMENTS, SPINS_PER_DAY, SPIN_DURATION};
pub use wallet::{Wallet, PURCHASE_REWARD, STARTING_COINS};

use bazaar_store::Store;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Store key holding the rewards state.
pub const REWARDS_KEY: &str = "rewards";

/// Wallet plus spin wheel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    #[serde(default)]
    pub wallet: Wallet,
    #[serde(default)]
    pub wheel: SpinWheel,
}

impl Rewards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coins(&self) -> u64 {
        self.wallet.coins()
    }

    /// Spin the wheel and credit the prize.
    pub fn spin<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<SpinOutcome, CatalogError> {
        let outcome = self.wheel.spin(today, rng)?;
        if outcome.prize > 0 {
            self.wallet.credit(outcome.prize);
        }
        Ok(outcome)
    }

    /// Exchange coins for the option with `id`.
    pub fn redeem(&mut self, id: &str) -> Result<&'static RedeemOption, CatalogError> {
        let option = redeem_option(id).ok_or_else(|| CatalogError::UnknownReward(id.to_string()))?;
        self.wallet.debit(option.cost)?;
        tracing::info!(reward = option.id, cost = option.cost, "reward redeemed");
        Ok(option)
    }

    pub fn progress(&self) -> Progress {
        Progress::for_balance(self.wallet.coins())
    }

    /// Load saved rewards, or a fresh state if nothing usable is stored.
    pub fn load(store: &Store) -> Self {
        match store.get::<Rewards>(REWARDS_KEY) {
            Ok(Some(rewards)) => rewards,
            Ok(None) => Self::new(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable rewards state");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &Store) -> Result<(), CatalogError> {
        store.set(REWARDS_KEY, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_spin_credits_prize() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rewards = Rewards::new();
        let outcome = rewards.spin(today(), &mut rng).unwrap();
        assert_eq!(rewards.coins(), STARTING_COINS + outcome.prize);
    }

    #[test]
    fn test_redeem_requires_coins() {
        let mut rewards = Rewards::new();
        assert!(matches!(
            rewards.redeem("amazon-500"),
            Err(CatalogError::InsufficientCoins { needed: 50_000, available: 150 })
        ));
        assert!(matches!(
            rewards.redeem("yacht"),
            Err(CatalogError::UnknownReward(_))
        ));

        rewards.wallet.credit(50_000);
        let option = rewards.redeem("amazon-500").unwrap();
        assert_eq!(option.title, "₹500 Amazon Voucher");
        assert_eq!(rewards.coins(), 150);
    }

    #[test]
    fn test_persistence() {
        let store = Store::in_memory();
        let mut rng = StdRng::seed_from_u64(3);
        let mut rewards = Rewards::load(&store);
        rewards.spin(today(), &mut rng).unwrap();
        rewards.save(&store).unwrap();

        let reloaded = Rewards::load(&store);
        assert_eq!(reloaded, rewards);
        assert_eq!(reloaded.wheel.spins_left(today()), 2);
    }

    #[test]
    fn test_corrupt_state_resets() {
        let store = Store::in_memory();
        store.set_raw(REWARDS_KEY, b"[]").unwrap();
        assert_eq!(Rewards::load(&store), Rewards::new());
    }
}
