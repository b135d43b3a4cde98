//! Redeemable rewards and progress toward the first one.

use serde::Serialize;

/// Coins needed for the first voucher.
pub const FIRST_TARGET: u64 = 50_000;

/// Something coins can be exchanged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RedeemOption {
    pub id: &'static str,
    pub title: &'static str,
    pub cost: u64,
}

/// Redeem catalog, cheapest first.
pub const REDEEM_OPTIONS: [RedeemOption; 3] = [
    RedeemOption {
        id: "amazon-500",
        title: "₹500 Amazon Voucher",
        cost: 50_000,
    },
    RedeemOption {
        id: "flipkart-1000",
        title: "₹1000 Flipkart Voucher",
        cost: 100_000,
    },
    RedeemOption {
        id: "headphones",
        title: "Premium Headphones",
        cost: 250_000,
    },
];

/// Look up a redeem option by id.
pub fn redeem_option(id: &str) -> Option<&'static RedeemOption> {
    REDEEM_OPTIONS.iter().find(|option| option.id == id)
}

/// Progress toward [`FIRST_TARGET`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub target: u64,
    /// Coins still missing, zero once reached.
    pub needed: u64,
    /// Percent of the target, capped at 100.
    pub percent: f64,
}

impl Progress {
    pub fn for_balance(coins: u64) -> Self {
        let percent = (coins as f64 / FIRST_TARGET as f64 * 100.0).min(100.0);
        Self {
            target: FIRST_TARGET,
            needed: FIRST_TARGET.saturating_sub(coins),
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.needed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let progress = Progress::for_balance(150);
        assert_eq!(progress.needed, 49_850);
        assert!((progress.percent - 0.3).abs() < 1e-9);

        let done = Progress::for_balance(120_000);
        assert_eq!(done.needed, 0);
        assert_eq!(done.percent, 100.0);
        assert!(done.is_complete());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(redeem_option("headphones").unwrap().cost, 250_000);
        assert!(redeem_option("pizza").is_none());
    }
}
