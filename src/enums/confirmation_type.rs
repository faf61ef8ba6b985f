use serde::{Serialize, Deserialize};
use strum_macros::Display;

/// The type of confirmation.
#[derive(Debug, Serialize, Deserialize, Display, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u32)]
#[serde(from = "u32", into = "u32")]
pub enum ConfirmationType {
    /// Generic.
    #[default]
    Generic = 1,
    /// Confirmation to confirm trade.
    Trade = 2,
    /// Confirmation to confirm on market.
    MarketSell = 3,
    /// Confirmation for account recovery.
    AccountRecovery = 6,
    /// Unknown.
    Unknown(u32),
}

impl From<u32> for ConfirmationType {
    fn from(value: u32) -> Self {
        match value {
            1 => ConfirmationType::Generic,
            2 => ConfirmationType::Trade,
            3 => ConfirmationType::MarketSell,
            6 => ConfirmationType::AccountRecovery,
            other => ConfirmationType::Unknown(other),
        }
    }
}

impl From<ConfirmationType> for u32 {
    fn from(conf_type: ConfirmationType) -> Self {
        match conf_type {
            ConfirmationType::Generic => 1,
            ConfirmationType::Trade => 2,
            ConfirmationType::MarketSell => 3,
            ConfirmationType::AccountRecovery => 6,
            ConfirmationType::Unknown(other) => other,
        }
    }
}
