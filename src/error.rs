//! Error types.

use reqwest::StatusCode;

/// Result type for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any range of errors encountered when making requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An input parameter is missing or invalid.
    #[error("Invalid parameter: {}", .0)]
    Parameter(#[from] ParameterError),
    /// The confirmation key could not be generated.
    #[error("Error generating confirmation key: {}", .0)]
    Signer(#[from] SignerError),
    /// Steam rejected the request's credentials. This is usually caused by expired cookies, a
    /// wrong identity secret, or a clock that is too far off from Steam's servers.
    #[error("Authentication rejected: {}", .0)]
    Authentication(String),
    /// An error was encountered making the request.
    #[error("Request error: {}", .0)]
    Transport(#[from] reqwest::Error),
    /// An error was encountered within the request middleware.
    #[error("Request middleware error: {}", .0)]
    Middleware(anyhow::Error),
    /// The response body could not be parsed as the expected JSON.
    #[error("Error parsing response: {}", .0)]
    MalformedResponse(#[from] serde_json::Error),
    /// The response was parsed but its contents were not what was expected.
    #[error("Unexpected response: {}", .0)]
    UnexpectedResponse(String),
    /// An unsuccessful response code was returned.
    #[error("Error {}", .0)]
    Http(StatusCode),
    /// Steam responded with `success: false` to a confirmation operation. When submitting
    /// multiple confirmations some of them may still have been applied.
    #[error("Confirmation unsuccessful. {}", .0.as_deref().unwrap_or("The confirmation may have succeeded, the confirmation no longer exists, or another trade may be going through. Check confirmations again to verify."))]
    ConfirmationUnsuccessful(Option<String>),
    /// No pending confirmation belongs to the trade offer.
    #[error("No confirmation for offer {}", .0)]
    NoConfirmationForOffer(u64),
}

impl Error {
    /// Steam did not accept the credentials used for the request.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
    
    /// The request did not make it to Steam or the connection failed midway.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Middleware(_))
    }
    
    /// The response did not have the shape that was expected.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_) | Self::UnexpectedResponse(_))
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Transport(e),
            reqwest_middleware::Error::Middleware(e) => Error::Middleware(e),
        }
    }
}

/// An error with a supplied parameter.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    /// No identity secret or signer was provided. Required for mobile confirmations.
    #[error("No identity secret")]
    NoIdentitySecret,
    /// A URL could not be parsed.
    #[error("{}", .0)]
    UrlParse(#[from] url::ParseError),
}

/// An error generating a confirmation key.
#[derive(thiserror::Error, Debug)]
pub enum SignerError {
    /// The identity secret is not valid base64.
    #[error("Invalid identity secret: {}", .0)]
    InvalidSecret(#[from] base64::DecodeError),
    /// The key material could not be used to create a MAC. [`IdentitySecretSigner`] never
    /// returns this since HMAC-SHA1 accepts keys of any length, but other signers may.
    ///
    /// [`IdentitySecretSigner`]: crate::signer::IdentitySecretSigner
    #[error("Invalid key length")]
    InvalidKeyLength,
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn classifies_error_kinds() {
        let error = Error::Authentication("needauth".into());
        
        assert!(error.is_authentication());
        assert!(!error.is_transport());
        
        let parse_error = serde_json::from_str::<u64>("not json").unwrap_err();
        let error = Error::from(parse_error);
        
        assert!(error.is_malformed());
        assert!(!error.is_authentication());
        assert!(Error::UnexpectedResponse("missing html".into()).is_malformed());
    }
    
    #[test]
    fn displays_provider_message_when_unsuccessful() {
        let error = Error::ConfirmationUnsuccessful(Some("Invalid nonce".into()));
        
        assert_eq!(error.to_string(), "Confirmation unsuccessful. Invalid nonce");
    }
    
    #[test]
    fn converts_decode_error_to_signer_error() {
        use base64::Engine;
        
        let decode_error = base64::engine::general_purpose::STANDARD.decode("%%%").unwrap_err();
        let error = Error::from(SignerError::from(decode_error));
        
        assert!(matches!(error, Error::Signer(SignerError::InvalidSecret(_))));
    }
}
