//! Single-flight purchase state machine.

use std::time::Duration;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::rewards::{Rewards, PURCHASE_REWARD};
use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Delay between pressing buy and the purchase completing.
pub const PROCESSING_DELAY: Duration = Duration::from_millis(1000);

/// How long the coin reward is shown before a retail redirect.
pub const REWARD_DISPLAY: Duration = Duration::from_millis(3500);

/// Steps of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseStep {
    /// Nothing in progress.
    Idle,
    /// Waiting out [`PROCESSING_DELAY`].
    Processing,
    /// Retail reward shown, redirect pending.
    Rewarded,
    /// Sent to the marketplace.
    Redirected,
}

impl PurchaseStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStep::Idle => "idle",
            PurchaseStep::Processing => "processing",
            PurchaseStep::Rewarded => "rewarded",
            PurchaseStep::Redirected => "redirected",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PurchaseStep::Idle => "Idle",
            PurchaseStep::Processing => "Processing",
            PurchaseStep::Rewarded => "Reward unlocked",
            PurchaseStep::Redirected => "Redirected",
        }
    }
}

/// What happens once processing finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    pub product_id: ProductId,
    /// Marketplace URL to open.
    pub redirect_url: String,
    /// Coins credited, `None` for wholesale purchases.
    pub reward: Option<u64>,
    /// Wait before opening [`redirect_url`](Self::redirect_url).
    #[serde(with = "duration_millis")]
    pub redirect_after: Duration,
}

/// Purchase flow for one session.
///
/// Only one purchase can be processing at a time; [`begin`](Self::begin)
/// fails while another is. The reward display of a finished purchase does not
/// block a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseFlow {
    step: PurchaseStep,
    product: Option<ProductId>,
}

impl Default for PurchaseFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseFlow {
    pub fn new() -> Self {
        Self {
            step: PurchaseStep::Idle,
            product: None,
        }
    }

    pub fn step(&self) -> PurchaseStep {
        self.step
    }

    /// Product of the current or last purchase.
    pub fn product(&self) -> Option<ProductId> {
        self.product
    }

    pub fn is_processing(&self) -> bool {
        self.step == PurchaseStep::Processing
    }

    /// Start buying `product`.
    pub fn begin(&mut self, product: &Product) -> Result<(), CatalogError> {
        if let (PurchaseStep::Processing, Some(current)) = (self.step, self.product) {
            tracing::debug!(current = %current, requested = %product.id, "purchase ignored");
            return Err(CatalogError::PurchaseInProgress(current.to_string()));
        }
        self.step = PurchaseStep::Processing;
        self.product = Some(product.id);
        tracing::debug!(product = %product.id, "purchase processing");
        Ok(())
    }

    /// Finish processing: credit the retail reward and decide the redirect.
    ///
    /// Call after [`PROCESSING_DELAY`]. Fails if `product` is not the one
    /// being processed.
    pub fn complete(
        &mut self,
        product: &Product,
        rewards: &mut Rewards,
    ) -> Result<PurchaseOutcome, CatalogError> {
        if !self.is_processing() || self.product != Some(product.id) {
            return Err(CatalogError::PurchaseNotStarted(product.id.to_string()));
        }

        let outcome = if product.is_wholesale {
            self.step = PurchaseStep::Redirected;
            PurchaseOutcome {
                product_id: product.id,
                redirect_url: product.url.clone(),
                reward: None,
                redirect_after: Duration::ZERO,
            }
        } else {
            rewards.wallet.credit(PURCHASE_REWARD);
            self.step = PurchaseStep::Rewarded;
            PurchaseOutcome {
                product_id: product.id,
                redirect_url: product.url.clone(),
                reward: Some(PURCHASE_REWARD),
                redirect_after: REWARD_DISPLAY,
            }
        };
        tracing::info!(
            product = %product.id,
            wholesale = product.is_wholesale,
            reward = outcome.reward.unwrap_or(0),
            "purchase completed"
        );
        Ok(outcome)
    }

    /// Mark the redirect as done.
    pub fn redirected(&mut self) {
        if self.step == PurchaseStep::Rewarded {
            self.step = PurchaseStep::Redirected;
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Source;

    fn retail() -> Product {
        let mut product = Product::new(1, "Atta", 240.0, 4.5, Source::Amazon, "Grocery");
        product.url = "https://www.amazon.in/s?k=atta&tag=atozhomedel0b-21".to_string();
        product
    }

    fn wholesale() -> Product {
        let mut product = Product::new(101, "Bricks", 8.0, 4.1, Source::Indiamart, "Construction");
        product.is_wholesale = true;
        product.url = "https://www.indiamart.com/proddetail/red-bricks".to_string();
        product
    }

    #[test]
    fn test_retail_purchase_rewards() {
        let mut flow = PurchaseFlow::new();
        let mut rewards = Rewards::new();
        let product = retail();

        flow.begin(&product).unwrap();
        assert!(flow.is_processing());

        let outcome = flow.complete(&product, &mut rewards).unwrap();
        assert_eq!(outcome.reward, Some(10));
        assert_eq!(outcome.redirect_after, REWARD_DISPLAY);
        assert_eq!(outcome.redirect_url, product.url);
        assert_eq!(rewards.coins(), 160);
        assert_eq!(flow.step(), PurchaseStep::Rewarded);

        flow.redirected();
        assert_eq!(flow.step(), PurchaseStep::Redirected);
    }

    #[test]
    fn test_wholesale_redirects_without_reward() {
        let mut flow = PurchaseFlow::new();
        let mut rewards = Rewards::new();
        let product = wholesale();

        flow.begin(&product).unwrap();
        let outcome = flow.complete(&product, &mut rewards).unwrap();
        assert_eq!(outcome.reward, None);
        assert_eq!(outcome.redirect_after, Duration::ZERO);
        assert_eq!(rewards.coins(), 150);
        assert_eq!(flow.step(), PurchaseStep::Redirected);
    }

    #[test]
    fn test_single_flight() {
        let mut flow = PurchaseFlow::new();
        let mut rewards = Rewards::new();
        let first = retail();
        let second = wholesale();

        flow.begin(&first).unwrap();
        assert!(matches!(
            flow.begin(&second),
            Err(CatalogError::PurchaseInProgress(_))
        ));
        assert!(matches!(
            flow.complete(&second, &mut rewards),
            Err(CatalogError::PurchaseNotStarted(_))
        ));

        flow.complete(&first, &mut rewards).unwrap();
        // Reward display does not block the next purchase.
        flow.begin(&second).unwrap();
        assert_eq!(flow.product(), Some(second.id));
    }
}
