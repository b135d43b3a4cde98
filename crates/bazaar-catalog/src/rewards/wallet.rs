//! Coin wallet.

use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Coins every new wallet starts with.
pub const STARTING_COINS: u64 = 150;

/// Coins credited for a retail purchase.
pub const PURCHASE_REWARD: u64 = 10;

/// Coin balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    coins: u64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_COINS)
    }
}

impl Wallet {
    pub fn new(coins: u64) -> Self {
        Self { coins }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Add coins, saturating at `u64::MAX`.
    pub fn credit(&mut self, amount: u64) -> u64 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }

    /// Spend coins, failing if the balance is too low.
    pub fn debit(&mut self, amount: u64) -> Result<u64, CatalogError> {
        if amount > self.coins {
            return Err(CatalogError::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(self.coins)
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.coins >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_balance() {
        assert_eq!(Wallet::default().coins(), 150);
    }

    #[test]
    fn test_credit_and_debit() {
        let mut wallet = Wallet::default();
        assert_eq!(wallet.credit(PURCHASE_REWARD), 160);
        assert_eq!(wallet.debit(60).unwrap(), 100);

        let err = wallet.debit(101).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InsufficientCoins { needed: 101, available: 100 }
        ));
        assert_eq!(wallet.coins(), 100);
    }
}
