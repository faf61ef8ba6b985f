//! Client for Steam's mobile confirmations. Lists pending confirmations and allows or cancels
//! them.

mod builder;
mod helpers;
mod operation;

pub use builder::ConfirmationClientBuilder;
pub use helpers::filter_by_type;
pub use operation::Operation;

use crate::SteamID;
use crate::enums::{ConfirmationType, Tag};
use crate::error::{Error, ParameterError, Result};
use crate::helpers::{
    get_default_client,
    parses_response,
    AJAX_REQUESTED_WITH,
    MOBILE_APP_REQUESTED_WITH,
};
use crate::response::Confirmation;
use crate::signer::ConfirmationSigner;
use crate::serialize;
use crate::time;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use reqwest::cookie::Jar;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use url::Url;

/// Signed query parameters sent with every confirmation request.
type ConfirmationParams = Vec<(&'static str, String)>;

/// The client for mobile confirmations.
///
/// Requests are made one at a time and are never retried. A failed batch may have been partially
/// applied by Steam, so check pending confirmations again before resubmitting.
#[derive(Debug, Clone)]
pub struct ConfirmationClient {
    /// The client for making requests.
    client: ClientWithMiddleware,
    /// The cookies to make requests with. Since the requests are made with the provided client,
    /// the cookies should be the same as what the client uses.
    cookies: Arc<Jar>,
    /// Generates confirmation keys.
    signer: Option<Arc<dyn ConfirmationSigner>>,
    /// The SteamID of the account.
    steamid: SteamID,
    /// How many seconds the local clock is behind Steam's servers.
    time_offset: Arc<AtomicI64>,
    /// Base URL for community requests.
    community_url: String,
    /// Base URL for Steam Web API requests.
    api_url: String,
}

impl ConfirmationClient {
    /// Builder for constructing a [`ConfirmationClient`].
    pub fn builder(
        steamid: SteamID,
    ) -> ConfirmationClientBuilder {
        ConfirmationClientBuilder::new(steamid)
    }
    
    /// The SteamID of the account.
    pub fn steamid(
        &self,
    ) -> SteamID {
        self.steamid
    }
    
    /// How many seconds the local clock is behind Steam's servers.
    pub fn time_offset(
        &self,
    ) -> i64 {
        self.time_offset.load(Ordering::Relaxed)
    }
    
    /// Sets how many seconds the local clock is behind Steam's servers.
    pub fn set_time_offset(
        &self,
        time_offset: i64,
    ) {
        self.time_offset.store(time_offset, Ordering::Relaxed);
    }
    
    /// Sets cookies.
    ///
    /// All requests require your login cookies to be set. Make sure your cookies are set before
    /// using this client.
    pub fn set_cookies(
        &self,
        cookies: &[String],
    ) -> Result<()> {
        let url = self.community_url.parse::<Url>()
            .map_err(ParameterError::UrlParse)?;
        
        for cookie_str in cookies {
            self.cookies.add_cookie_str(cookie_str, &url);
        }
        
        Ok(())
    }
    
    /// Gets the pending confirmations. An empty list is returned if there are none.
    pub async fn list_pending(
        &self,
    ) -> Result<Vec<Confirmation>> {
        #[derive(Deserialize)]
        struct GetListResponse {
            #[serde(default)]
            success: Option<bool>,
            #[serde(default)]
            needauth: Option<bool>,
            #[serde(default)]
            message: Option<String>,
            #[serde(default)]
            conf: Option<Vec<Confirmation>>,
        }
        
        let uri = self.get_url("/mobileconf/getlist");
        let query = self.get_confirmation_query_params(Tag::Conf)?;
        
        log::debug!("Fetching confirmations from {uri}");
        
        let response = self.client.get(&uri)
            .header("X-Requested-With", MOBILE_APP_REQUESTED_WITH)
            .query(&query)
            .send()
            .await?;
        let body: GetListResponse = parses_response(response).await?;
        
        if body.needauth == Some(true) {
            return Err(Error::Authentication(body.message.unwrap_or_else(|| "Steam requires authentication".into())));
        }
        
        if body.success == Some(false) {
            return Err(Error::Authentication(body.message.unwrap_or_else(|| "Confirmation key rejected".into())));
        }
        
        let confirmations = body.conf.unwrap_or_default();
        
        log::debug!("{} pending confirmation(s)", confirmations.len());
        
        Ok(confirmations)
    }
    
    /// Accepts a confirmation.
    pub async fn approve_one(
        &self,
        confirmation: &Confirmation,
    ) -> Result<()> {
        self.send_confirmation_ajax(confirmation.id, confirmation.nonce, Operation::Allow).await
    }
    
    /// Cancels a confirmation.
    pub async fn deny_one(
        &self,
        confirmation: &Confirmation,
    ) -> Result<()> {
        self.send_confirmation_ajax(confirmation.id, confirmation.nonce, Operation::Cancel).await
    }
    
    /// Accepts a confirmation by ID.
    pub async fn approve_by_id(
        &self,
        id: u64,
        nonce: u64,
    ) -> Result<()> {
        self.send_confirmation_ajax(id, nonce, Operation::Allow).await
    }
    
    /// Cancels a confirmation by ID.
    pub async fn deny_by_id(
        &self,
        id: u64,
        nonce: u64,
    ) -> Result<()> {
        self.send_confirmation_ajax(id, nonce, Operation::Cancel).await
    }
    
    /// Accepts confirmations in a single request. Nothing is sent if `confirmations` is empty.
    ///
    /// Steam does not apply the batch atomically. On an unsuccessful response some of the
    /// confirmations may still have been accepted.
    pub async fn approve_all(
        &self,
        confirmations: &[Confirmation],
    ) -> Result<()> {
        self.send_multi_confirmation_ajax(confirmations, Operation::Allow).await
    }
    
    /// Cancels confirmations in a single request. Nothing is sent if `confirmations` is empty.
    pub async fn deny_all(
        &self,
        confirmations: &[Confirmation],
    ) -> Result<()> {
        self.send_multi_confirmation_ajax(confirmations, Operation::Cancel).await
    }
    
    /// Accepts all pending trade offer confirmations. Returns the confirmations that were sent.
    pub async fn approve_all_trade_offers(
        &self,
    ) -> Result<Vec<Confirmation>> {
        self.approve_all_of_type(Confirmation::TRADE_OFFER).await
    }
    
    /// Accepts all pending market listing confirmations. Returns the confirmations that were
    /// sent.
    pub async fn approve_all_market_listings(
        &self,
    ) -> Result<Vec<Confirmation>> {
        self.approve_all_of_type(Confirmation::MARKET_LISTING).await
    }
    
    /// Accepts every pending confirmation. Returns the confirmations that were sent.
    pub async fn approve_everything_pending(
        &self,
    ) -> Result<Vec<Confirmation>> {
        let confirmations = self.list_pending().await?;
        
        self.approve_all(&confirmations).await?;
        
        Ok(confirmations)
    }
    
    /// Accepts the confirmation for a trade offer. Matched on the confirmation type and creator
    /// rather than `type_name`, which Steam localizes to the account's language.
    pub async fn approve_trade_offer(
        &self,
        trade_offer_id: u64,
    ) -> Result<()> {
        let confirmation = self.list_pending().await?
            .into_iter()
            .find(|confirmation| {
                confirmation.r#type == ConfirmationType::Trade &&
                confirmation.creator_id == trade_offer_id
            })
            .ok_or(Error::NoConfirmationForOffer(trade_offer_id))?;
        
        self.approve_one(&confirmation).await
    }
    
    /// Gets the HTML describing a confirmation.
    pub async fn confirmation_details(
        &self,
        confirmation: &Confirmation,
    ) -> Result<String> {
        #[derive(Deserialize)]
        struct DetailsResponse {
            success: bool,
            #[serde(default)]
            html: Option<String>,
        }
        
        let uri = self.get_url(&format!("/mobileconf/details/{}", confirmation.id));
        let query = self.get_confirmation_query_params(Tag::Details)?;
        let response = self.client.get(&uri)
            .header("X-Requested-With", MOBILE_APP_REQUESTED_WITH)
            .query(&query)
            .send()
            .await?;
        let body: DetailsResponse = parses_response(response).await?;
        
        if !body.success {
            return Err(Error::Authentication("Confirmation key rejected".into()));
        }
        
        body.html
            .ok_or_else(|| Error::UnexpectedResponse("Missing html in confirmation details".into()))
    }
    
    /// Gets the current time on Steam's servers as a unix timestamp.
    pub async fn query_server_time(
        &self,
    ) -> Result<i64> {
        #[derive(Deserialize)]
        struct ServerTime {
            #[serde(with = "serialize::string")]
            server_time: i64,
        }
        
        #[derive(Deserialize)]
        struct Response {
            response: ServerTime,
        }
        
        let uri = format!("{}/ITwoFactorService/QueryTime/v1", self.api_url);
        let response = self.client.post(&uri)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("steamid=0")
            .send()
            .await?;
        let body: Response = parses_response(response).await?;
        
        Ok(body.response.server_time)
    }
    
    /// Queries Steam's time and stores the difference from the local clock. Returns the new
    /// offset.
    pub async fn sync_time_offset(
        &self,
    ) -> Result<i64> {
        let server_time = self.query_server_time().await?;
        let time_offset = server_time - time::get_system_time();
        
        if time_offset.abs() > 30 {
            log::warn!("Local clock is {time_offset} seconds off from Steam's servers");
        }
        
        self.set_time_offset(time_offset);
        
        Ok(time_offset)
    }
    
    async fn approve_all_of_type(
        &self,
        type_name: &str,
    ) -> Result<Vec<Confirmation>> {
        let confirmations = filter_by_type(self.list_pending().await?, type_name);
        
        self.approve_all(&confirmations).await?;
        
        Ok(confirmations)
    }
    
    fn get_confirmation_query_params(
        &self,
        tag: Tag,
    ) -> Result<ConfirmationParams> {
        let signer = self.signer.as_ref()
            .ok_or(ParameterError::NoIdentitySecret)?;
        let time = time::server_time(self.time_offset());
        let key = signer.confirmation_key(tag, time)?;
        let steamid_64 = u64::from(self.steamid);
        
        Ok(vec![
            ("p", signer.device_id(self.steamid)),
            ("a", steamid_64.to_string()),
            ("k", key),
            ("t", time.to_string()),
            ("m", "android".into()),
            ("tag", tag.to_string()),
        ])
    }
    
    async fn send_confirmation_ajax(
        &self,
        id: u64,
        nonce: u64,
        operation: Operation,
    ) -> Result<()> {
        let mut query = self.get_confirmation_query_params(operation.tag())?;
        
        query.push(("op", operation.to_string()));
        query.push(("cid", id.to_string()));
        query.push(("ck", nonce.to_string()));
        
        let uri = self.get_url("/mobileconf/ajaxop");
        
        log::debug!("Sending {operation} for confirmation {id}");
        
        let response = self.client.get(&uri)
            .header("X-Requested-With", AJAX_REQUESTED_WITH)
            .query(&query)
            .send()
            .await?;
        let body: SendConfirmationResponse = parses_response(response).await?;
        
        body.into_result()
    }
    
    async fn send_multi_confirmation_ajax(
        &self,
        confirmations: &[Confirmation],
        operation: Operation,
    ) -> Result<()> {
        if confirmations.is_empty() {
            log::debug!("No confirmations to {operation}, skipping request");
            return Ok(());
        }
        
        let mut form = self.get_confirmation_query_params(operation.tag())?;
        
        form.push(("op", operation.to_string()));
        form.extend(helpers::multi_confirmation_fields(confirmations));
        
        let uri = self.get_url("/mobileconf/multiajaxop");
        
        log::debug!("Sending {operation} for {} confirmation(s)", confirmations.len());
        
        let response = self.client.post(&uri)
            .header("X-Requested-With", AJAX_REQUESTED_WITH)
            .form(&form)
            .send()
            .await?;
        let body: SendConfirmationResponse = parses_response(response).await?;
        
        body.into_result()
    }
    
    fn get_url(
        &self,
        pathname: &str,
    ) -> String {
        format!("{}{pathname}", self.community_url)
    }
}

#[derive(Deserialize)]
struct SendConfirmationResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

impl SendConfirmationResponse {
    fn into_result(
        self,
    ) -> Result<()> {
        if !self.success {
            log::warn!("Confirmation unsuccessful: {}", self.message.as_deref().unwrap_or("no message"));
            return Err(Error::ConfirmationUnsuccessful(self.message));
        }
        
        Ok(())
    }
}

impl TryFrom<ConfirmationClientBuilder> for ConfirmationClient {
    type Error = Error;
    
    fn try_from(mut builder: ConfirmationClientBuilder) -> Result<Self> {
        let signer = builder.take_signer()?;
        let cookies = builder.cookies
            .unwrap_or_else(|| Arc::new(Jar::default()));
        let client = match builder.client {
            Some(client) => client,
            None => get_default_client(
                Arc::clone(&cookies),
                builder.user_agent,
                builder.timeout,
            )?,
        };
        let community_url = builder.community_url.trim_end_matches('/').to_string();
        let api_url = builder.api_url.trim_end_matches('/').to_string();
        let client = Self {
            client,
            cookies,
            signer,
            steamid: builder.steamid,
            time_offset: Arc::new(AtomicI64::new(builder.time_offset)),
            community_url,
            api_url,
        };
        
        if !builder.cookie_strings.is_empty() {
            client.set_cookies(&builder.cookie_strings)?;
        }
        
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[derive(Debug)]
    struct FixedSigner;
    
    impl ConfirmationSigner for FixedSigner {
        fn confirmation_key(&self, tag: Tag, timestamp: i64) -> Result<String, crate::error::SignerError> {
            Ok(format!("{tag}-{timestamp}"))
        }
        
        fn device_id(&self, _steamid: SteamID) -> String {
            "android:device".into()
        }
    }
    
    fn client() -> ConfirmationClient {
        ConfirmationClient::builder(SteamID::from(76561197960287930))
            .signer(Arc::new(FixedSigner))
            .community_url("http://localhost:1/".into())
            .build()
            .unwrap()
    }
    
    #[test]
    fn builds_signed_params() {
        let client = client();
        let params = client.get_confirmation_query_params(Tag::Conf).unwrap();
        let keys = params.iter().map(|(key, _)| *key).collect::<Vec<_>>();
        
        assert_eq!(keys, vec!["p", "a", "k", "t", "m", "tag"]);
        assert_eq!(params[0].1, "android:device");
        assert_eq!(params[1].1, "76561197960287930");
        assert_eq!(params[2].1, format!("conf-{}", params[3].1));
        assert_eq!(params[4].1, "android");
        assert_eq!(params[5].1, "conf");
    }
    
    #[test]
    fn applies_time_offset_to_timestamp() {
        let client = client();
        
        client.set_time_offset(3600);
        
        let before = time::get_system_time() + 3600;
        let params = client.get_confirmation_query_params(Tag::Allow).unwrap();
        let timestamp = params[3].1.parse::<i64>().unwrap();
        
        assert!(timestamp >= before);
        assert!(timestamp <= time::get_system_time() + 3600);
    }
    
    #[test]
    fn missing_signer_is_parameter_error() {
        let client = ConfirmationClient::builder(SteamID::from(76561197960287930))
            .build()
            .unwrap();
        let error = client.get_confirmation_query_params(Tag::Conf).unwrap_err();
        
        assert!(matches!(error, Error::Parameter(ParameterError::NoIdentitySecret)));
    }
    
    #[test]
    fn trims_trailing_slash_from_url() {
        assert_eq!(client().get_url("/mobileconf/getlist"), "http://localhost:1/mobileconf/getlist");
    }
    
    #[test]
    fn unsuccessful_response_is_surfaced() {
        let body: SendConfirmationResponse = serde_json::from_str(r#"{"success":false,"message":"Invalid nonce"}"#).unwrap();
        
        assert!(matches!(
            body.into_result(),
            Err(Error::ConfirmationUnsuccessful(Some(message))) if message == "Invalid nonce",
        ));
    }
}
