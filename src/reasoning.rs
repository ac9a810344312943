//! Heuristic explanations for a classifier verdict.
//!
//! The classifier only answers bot or human. The rules here look at the same
//! metrics the operator entered and say, in plain words, which of them look
//! unusual. Every matching rule contributes one line, in rule order. When
//! nothing matches, a single fallback line is chosen by the verdict, so the
//! list is never empty.

use serde::{Deserialize, Serialize};

use crate::account::AccountMetrics;

/// Accounts following more than this many users with zero followers look staged
pub const ASYMMETRIC_FRIENDS_MIN: u64 = 100;
/// Follow count above which the follower ratio is considered
pub const RATIO_FRIENDS_MIN: u64 = 1000;
/// Followers per followed account below which the ratio is flagged
pub const LOW_FOLLOWER_RATIO: f64 = 0.1;
/// Post count above which posts-per-follower is considered
pub const PROLIFIC_STATUSES_MIN: u64 = 10_000;
/// Posts per follower above which posting looks automated
pub const POSTS_PER_FOLLOWER_MAX: f64 = 100.0;
/// Post count above which engagement is considered
pub const ACTIVE_STATUSES_MIN: u64 = 1000;
/// Likes below which an active account counts as disengaged
pub const LOW_FAVOURITES_MAX: u64 = 10;

/// One explanation line and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Follows many, followed by nobody
    AsymmetricFollow,
    /// Very few followers per followed account
    LowFollowerRatio,
    /// Default theme and default picture
    DefaultAppearance,
    /// Many posts per follower
    HighPostRatio,
    /// Posts a lot, likes almost nothing
    LowEngagement,
    /// Verified by the platform
    Verified,
    /// Fallback for a bot verdict
    AutomatedPattern,
    /// Fallback for a human verdict
    HumanPattern,
}

impl Signal {
    /// Explanation shown to the operator
    pub fn message(self) -> &'static str {
        match self {
            Signal::AsymmetricFollow => {
                "The account follows many users but has no followers, which is unusual for human accounts."
            },
            Signal::LowFollowerRatio => {
                "The followers-to-following ratio is very low, which is common for bot accounts."
            },
            Signal::DefaultAppearance => {
                "The account uses both default profile settings and default profile image, suggesting automated creation."
            },
            Signal::HighPostRatio => {
                "The account has an unusually high number of posts relative to its follower count, most bots are prone to use automated posting."
            },
            Signal::LowEngagement => {
                "Despite high activity, the account has very low engagement with other users' content."
            },
            Signal::Verified => {
                "The account is verified, which is a strong indicator of a legitimate human user."
            },
            Signal::AutomatedPattern => {
                "The combination of account metrics matches patterns commonly seen in automated accounts."
            },
            Signal::HumanPattern => {
                "The account's behavior and characteristics align with typical human usage patterns."
            },
        }
    }

    /// Whether this is one of the verdict fallbacks
    pub fn is_fallback(self) -> bool {
        matches!(self, Signal::AutomatedPattern | Signal::HumanPattern)
    }
}

/// Evaluate every rule against `metrics`, in order.
pub fn signals(metrics: &AccountMetrics, is_bot: bool) -> Vec<Signal> {
    let mut found = Vec::new();

    if metrics.followers_count == 0 && metrics.friends_count > ASYMMETRIC_FRIENDS_MIN {
        found.push(Signal::AsymmetricFollow);
    }

    // friends_count > 1000 here, so the division is safe
    if metrics.friends_count > RATIO_FRIENDS_MIN
        && (metrics.followers_count as f64 / metrics.friends_count as f64) < LOW_FOLLOWER_RATIO
    {
        found.push(Signal::LowFollowerRatio);
    }

    if metrics.default_profile && metrics.default_profile_image {
        found.push(Signal::DefaultAppearance);
    }

    if metrics.statuses_count > PROLIFIC_STATUSES_MIN
        && metrics.statuses_count as f64 / metrics.followers_count.max(1) as f64
            > POSTS_PER_FOLLOWER_MAX
    {
        found.push(Signal::HighPostRatio);
    }

    if metrics.statuses_count > ACTIVE_STATUSES_MIN && metrics.favourites_count < LOW_FAVOURITES_MAX
    {
        found.push(Signal::LowEngagement);
    }

    if metrics.verified {
        found.push(Signal::Verified);
    }

    if found.is_empty() {
        found.push(if is_bot {
            Signal::AutomatedPattern
        } else {
            Signal::HumanPattern
        });
    }

    found
}

/// Explanation lines for a verdict. Never empty.
pub fn reasons(metrics: &AccountMetrics, is_bot: bool) -> Vec<String> {
    signals(metrics, is_bot)
        .into_iter()
        .map(|signal| signal.message().to_string())
        .collect()
}
