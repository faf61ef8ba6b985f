use crate::enums::ConfirmationType;
use crate::time::ServerTime;
use crate::serialize;
use std::fmt;
use chrono::serde::ts_seconds_option;
use serde::{Serialize, Deserialize};

/// Mobile confirmation. Used primarily for confirming trade offers or listing items on the market.
///
/// The `id` and `nonce` pair can only be used once and only for a short time after the
/// confirmation was listed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Confirmation {
    /// The ID of the confirmation.
    #[serde(with = "serialize::string_or_number")]
    pub id: u64,
    /// The nonce.
    #[serde(with = "serialize::string_or_number")]
    pub nonce: u64,
    /// The type name e.g. "Trade Offer" or "Market Listing".
    pub type_name: String,
    /// The confirmation type.
    #[serde(default)]
    pub r#type: ConfirmationType,
    /// Trade offer ID or market transaction ID.
    #[serde(default, with = "serialize::string_or_zero")]
    pub creator_id: u64,
    /// The time the confirmation was created.
    #[serde(default, with = "ts_seconds_option")]
    pub creation_time: Option<ServerTime>,
    /// The headline.
    #[serde(default)]
    pub headline: String,
    /// The description.
    #[serde(default)]
    pub summary: Vec<String>,
    /// The accept text e.g. "Accept" or "Send Offer".
    #[serde(default)]
    pub accept: String,
    /// The cancel text.
    #[serde(default)]
    pub cancel: String,
    /// `true` if can be confirmed with multiple other confirmations.
    #[serde(default)]
    pub multi: bool,
    /// The icon.
    #[serde(default)]
    pub icon: Option<String>,
    /// Warnings.
    #[serde(default)]
    pub warn: Option<Vec<String>>,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.type_name, self.headline)
    }
}

impl Confirmation {
    /// Type name of trade offer confirmations.
    pub const TRADE_OFFER: &'static str = "Trade Offer";
    /// Type name of market listing confirmations.
    pub const MARKET_LISTING: &'static str = "Market Listing";
    
    /// Whether this confirmation is of the given type name.
    pub fn is_type(&self, type_name: &str) -> bool {
        self.type_name == type_name
    }
    
    /// Description for items we are giving in a trade.
    pub fn giving(&self) -> Option<&str> {
        if self.r#type != ConfirmationType::Trade {
            return None;
        }
        
        self.summary.first().map(|s| s.as_str())
    }
    
    /// Description for items we are receiving in a trade.
    pub fn receiving(&self) -> Option<&str> {
        if self.r#type != ConfirmationType::Trade {
            return None;
        }
        
        self.summary.get(1).map(|s| s.as_str())
    }
}
