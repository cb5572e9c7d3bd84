//! Reward calculation: per-completion multipliers, claims and the mock
//! price feed that backs the claim multiplier.

mod claim;
mod feeds;
mod multiplier;

pub use claim::RewardClaim;
pub use feeds::{PriceFeed, PriceQuote};
pub use multiplier::{
    FixedMultiplier, MultiplierRange, MultiplierSource, SeededMultiplier, SequenceMultiplier,
    ThreadRngMultiplier,
};

/// Claim multiplier quoted by the mock FTSO feed.
pub const DEFAULT_CLAIM_MULTIPLIER: f64 = 1.23;
