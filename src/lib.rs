//! Approve and deny Steam mobile confirmations.
//!
//! Trade offers and market listings created from a web session must be confirmed from the
//! Steam mobile authenticator before they go through. [`ConfirmationClient`] lists the pending
//! confirmations for an account and allows or cancels them using keys generated from the
//! account's identity secret.
//!
//! ```no_run
//! use steam_mobileconf::{ConfirmationClient, SteamID};
//!
//! # async fn run() -> Result<(), steam_mobileconf::error::Error> {
//! let client = ConfirmationClient::builder(SteamID::from(76561197960287930))
//!     .identity_secret("AAECAwQFBgcICQoLDA0ODxAREhM=".into())
//!     .cookies(vec!["steamLoginSecure=...".into()])
//!     .build()?;
//! let accepted = client.approve_all_trade_offers().await?;
//!
//! println!("Accepted {} trade offer(s)", accepted.len());
//! # Ok(())
//! # }
//! ```

pub mod confirmation_client;
pub mod enums;
pub mod error;
pub mod response;
pub mod signer;
pub mod time;

mod helpers;
mod serialize;

pub use confirmation_client::{ConfirmationClient, ConfirmationClientBuilder, Operation, filter_by_type};
pub use enums::{ConfirmationType, Tag};
pub use error::{Error, Result};
pub use response::Confirmation;
pub use signer::{ConfirmationSigner, IdentitySecretSigner, get_device_id};
pub use steamid_ng::SteamID;
