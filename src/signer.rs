//! Generation of confirmation keys and device IDs.

use crate::enums::Tag;
use crate::error::SignerError;
use crate::SteamID;
use std::fmt;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use lazy_regex::regex_replace_all;
use sha1::{Digest, Sha1};

type HmacSha1 = Hmac<Sha1>;

/// Signs mobile confirmation requests.
///
/// Every request to the mobile confirmation endpoints must carry a key generated for the
/// request's [`Tag`] and timestamp along with the ID of the device the account's authenticator
/// is registered to. Implement this to supply keys from somewhere other than a plain identity
/// secret.
pub trait ConfirmationSigner: Send + Sync + fmt::Debug {
    /// Generates a confirmation key for the given tag at the given unix timestamp.
    fn confirmation_key(&self, tag: Tag, timestamp: i64) -> Result<String, SignerError>;
    
    /// Gets the device ID for the account.
    fn device_id(&self, steamid: SteamID) -> String;
}

/// Signs requests using an account's identity secret.
#[derive(Clone)]
pub struct IdentitySecretSigner {
    secret: Vec<u8>,
}

impl fmt::Debug for IdentitySecretSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentitySecretSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl IdentitySecretSigner {
    /// Creates a new [`IdentitySecretSigner`] from a base64-encoded identity secret.
    ///
    /// Only the base64 decoding is checked. HMAC-SHA1 accepts a key of any length, so any
    /// decoded secret can sign.
    pub fn new(identity_secret: &str) -> Result<Self, SignerError> {
        let secret = STANDARD.decode(identity_secret.trim())?;
        
        Ok(Self {
            secret,
        })
    }
}

impl ConfirmationSigner for IdentitySecretSigner {
    fn confirmation_key(&self, tag: Tag, timestamp: i64) -> Result<String, SignerError> {
        let mut mac = HmacSha1::new_from_slice(&self.secret)
            .map_err(|_e| SignerError::InvalidKeyLength)?;
        
        mac.update(&timestamp.to_be_bytes());
        mac.update(tag.to_string().as_bytes());
        
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
    
    fn device_id(&self, steamid: SteamID) -> String {
        get_device_id(steamid)
    }
}

/// Gets the device ID the Steam mobile app derives from a SteamID.
pub fn get_device_id(steamid: SteamID) -> String {
    let mut hasher = Sha1::new();
    
    hasher.update(u64::from(steamid).to_string().as_bytes());
    
    let hash = hex::encode(hasher.finalize());
    let device_id = regex_replace_all!(
        r#"^([0-9a-f]{8})([0-9a-f]{4})([0-9a-f]{4})([0-9a-f]{4})([0-9a-f]{12}).*$"#i,
        &hash,
        |_, a, b, c, d, e| format!("{a}-{b}-{c}-{d}-{e}"),
    );
    
    format!("android:{device_id}")
}
