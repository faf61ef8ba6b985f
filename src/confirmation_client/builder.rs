use super::ConfirmationClient;
use crate::SteamID;
use crate::error::Result;
use crate::helpers::{API_URL, COMMUNITY_URL, USER_AGENT_STRING};
use crate::signer::{ConfirmationSigner, IdentitySecretSigner};
use std::sync::Arc;
use std::time::Duration;
use reqwest::cookie::Jar;
use reqwest_middleware::ClientWithMiddleware;

/// Builder for constructing a [`ConfirmationClient`].
#[derive(Debug, Clone)]
pub struct ConfirmationClientBuilder {
    /// The SteamID of the account.
    pub(crate) steamid: SteamID,
    /// The identity secret for the account. Converted into a signer when built.
    pub(crate) identity_secret: Option<String>,
    /// Signer for confirmation keys. Takes precedence over `identity_secret`.
    pub(crate) signer: Option<Arc<dyn ConfirmationSigner>>,
    /// Request cookies.
    pub(crate) cookies: Option<Arc<Jar>>,
    /// Login cookies to add to the cookie jar.
    pub(crate) cookie_strings: Vec<String>,
    /// Client to use for requests. Remember to also include the cookies connected to this client.
    pub(crate) client: Option<ClientWithMiddleware>,
    /// User agent for requests.
    pub(crate) user_agent: &'static str,
    /// Timeout for requests made by the default client.
    pub(crate) timeout: Option<Duration>,
    /// How many seconds your computer is behind Steam's servers.
    pub(crate) time_offset: i64,
    /// Base URL for community requests.
    pub(crate) community_url: String,
    /// Base URL for Steam Web API requests.
    pub(crate) api_url: String,
}

impl ConfirmationClientBuilder {
    /// Creates a new [`ConfirmationClientBuilder`] for the account.
    pub fn new(steamid: SteamID) -> Self {
        Self {
            steamid,
            identity_secret: None,
            signer: None,
            cookies: None,
            cookie_strings: Vec::new(),
            client: None,
            user_agent: USER_AGENT_STRING,
            timeout: None,
            time_offset: 0,
            community_url: COMMUNITY_URL.into(),
            api_url: API_URL.into(),
        }
    }
    
    /// The identity secret for the account. Required for mobile confirmations unless a
    /// [`signer`](Self::signer) is provided.
    pub fn identity_secret(mut self, identity_secret: String) -> Self {
        self.identity_secret = Some(identity_secret);
        self
    }
    
    /// Signer for generating confirmation keys and the device ID.
    pub fn signer(mut self, signer: Arc<dyn ConfirmationSigner>) -> Self {
        self.signer = Some(signer);
        self
    }
    
    /// Client to use for requests. It is also required to include the associated cookies with this
    /// client so that the `set_cookies` method works as expected.
    pub fn client(mut self, client: ClientWithMiddleware, cookies: Arc<Jar>) -> Self {
        self.client = Some(client);
        self.cookies = Some(cookies);
        self
    }
    
    /// Login cookies for steamcommunity.com.
    pub fn cookies(mut self, cookies: Vec<String>) -> Self {
        self.cookie_strings = cookies;
        self
    }
    
    /// User agent for requests. Ignored if a [`client`](Self::client) is provided.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }
    
    /// Timeout for requests. Ignored if a [`client`](Self::client) is provided.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    
    /// How many seconds your computer is behind Steam's servers.
    pub fn time_offset(mut self, time_offset: i64) -> Self {
        self.time_offset = time_offset;
        self
    }
    
    /// Base URL for community requests. Defaults to `https://steamcommunity.com`.
    pub fn community_url(mut self, community_url: String) -> Self {
        self.community_url = community_url;
        self
    }
    
    /// Base URL for Steam Web API requests. Defaults to `https://api.steampowered.com`.
    pub fn api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }
    
    /// Builds the [`ConfirmationClient`].
    pub fn build(self) -> Result<ConfirmationClient> {
        ConfirmationClient::try_from(self)
    }
    
    /// Takes the configured signer, creating one from the identity secret if needed.
    pub(crate) fn take_signer(&mut self) -> Result<Option<Arc<dyn ConfirmationSigner>>> {
        if let Some(signer) = self.signer.take() {
            return Ok(Some(signer));
        }
        
        match self.identity_secret.take() {
            Some(identity_secret) => {
                let signer = IdentitySecretSigner::new(&identity_secret)?;
                
                Ok(Some(Arc::new(signer)))
            },
            None => Ok(None),
        }
    }
}
