//! Account metrics as entered on the dashboard form.
//!
//! [`AccountMetrics`] is the payload sent to the classifier under
//! `account_data`. Field names match the service's column names, so the
//! record serializes as-is.

mod fields;

pub use fields::{describe, field_help, is_known_field, FIELDS, FIELD_HELP};

use serde::{Deserialize, Serialize};

use crate::error::{BotScopeError, Result};

/// Public profile metrics of one social media account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountMetrics {
    /// Account identifier (usually the username)
    pub id: String,
    /// Accounts following this account
    pub followers_count: u64,
    /// Accounts this account follows
    pub friends_count: u64,
    /// Lists that include this account
    pub listed_count: u64,
    /// Posts this account has liked
    pub favourites_count: u64,
    /// Posts this account has made
    pub statuses_count: u64,
    /// Default theme/layout
    pub default_profile: bool,
    /// Default profile picture
    pub default_profile_image: bool,
    /// Verified by the platform
    pub verified: bool,
    /// Private account
    pub protected: bool,
    /// Location services enabled
    pub geo_enabled: bool,
    /// Multiple contributors may post
    pub contributors_enabled: bool,
}

impl AccountMetrics {
    /// Create empty metrics for an account id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Apply one textual form edit.
    ///
    /// Counts accept non-negative integers (blank means 0), flags accept
    /// `true/false/1/0/on/off/yes/no`, and `id` takes the value unchanged.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "id" => self.id = value.to_string(),
            "followers_count" => self.followers_count = parse_count(field, value)?,
            "friends_count" => self.friends_count = parse_count(field, value)?,
            "listed_count" => self.listed_count = parse_count(field, value)?,
            "favourites_count" => self.favourites_count = parse_count(field, value)?,
            "statuses_count" => self.statuses_count = parse_count(field, value)?,
            "default_profile" => self.default_profile = parse_flag(field, value)?,
            "default_profile_image" => self.default_profile_image = parse_flag(field, value)?,
            "verified" => self.verified = parse_flag(field, value)?,
            "protected" => self.protected = parse_flag(field, value)?,
            "geo_enabled" => self.geo_enabled = parse_flag(field, value)?,
            "contributors_enabled" => self.contributors_enabled = parse_flag(field, value)?,
            _ => return Err(BotScopeError::invalid_field(field, "unknown field")),
        }
        Ok(())
    }

    /// Builder-style [`AccountMetrics::set_field`]
    pub fn with_field(mut self, field: &str, value: &str) -> Result<Self> {
        self.set_field(field, value)?;
        Ok(self)
    }
}

fn parse_count(field: &str, value: &str) -> Result<u64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| {
        BotScopeError::invalid_field(field, format!("'{value}' is not a non-negative integer"))
    })
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" | "" => Ok(false),
        other => Err(BotScopeError::invalid_field(
            field,
            format!("'{other}' is not a boolean"),
        )),
    }
}
