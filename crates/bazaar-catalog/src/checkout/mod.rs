//! Checkout module.
//!
//! Purchases are simulated: a short processing delay, an optional coin reward
//! and a redirect to the marketplace listing.

mod flow;

pub use flow::{PurchaseFlow, PurchaseOutcome, PurchaseStep, PROCESSING_DELAY, REWARD_DISPLAY};
