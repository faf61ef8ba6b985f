use crate::error::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use lazy_regex::{regex_captures, regex_is_match};
use reqwest::cookie::CookieStore;
use reqwest::header;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;

/// Default hostname for community requests.
pub const COMMUNITY_URL: &str = "https://steamcommunity.com";
/// Default hostname for Steam Web API requests.
pub const API_URL: &str = "https://api.steampowered.com";
/// The user agent of the Steam mobile app.
pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (Linux; U; Android 4.1.1; en-us; Google Nexus 4 - 4.1.1 - API 16 - 768x1280 Build/JRO03S) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";
/// `X-Requested-With` value sent by the Steam mobile app.
pub const MOBILE_APP_REQUESTED_WITH: &str = "com.valvesoftware.android.steam.community";
/// `X-Requested-With` value for AJAX requests.
pub const AJAX_REQUESTED_WITH: &str = "XMLHttpRequest";

/// Creates a client for requests. Requests made with this client are never retried.
pub fn get_default_client<T>(
    cookie_store: Arc<T>,
    user_agent_string: &'static str,
    timeout: Option<Duration>,
) -> Result<ClientWithMiddleware, reqwest::Error>
where
    T: CookieStore + 'static,
{
    let mut headers = header::HeaderMap::new();
    
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));
    
    let mut builder = reqwest::ClientBuilder::new()
        .cookie_provider(cookie_store)
        .default_headers(headers);
    
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    
    Ok(ClientBuilder::new(builder.build()?).build())
}

fn is_login(location_option: Option<&header::HeaderValue>) -> bool {
    match location_option {
        Some(location) => {
            if let Ok(location_str) = location.to_str() {
                regex_is_match!("/login", location_str)
            } else {
                false
            }
        },
        None => false,
    }
}

/// Checks the status of a response and reads its body.
pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes> {
    let status = response.status();
    
    // Redirects are followed, so a session that expired lands on the login page.
    if response.url().path().starts_with("/login") {
        return Err(Error::Authentication("Redirected to login".into()));
    }
    
    match status.as_u16() {
        300..=399 if is_login(response.headers().get(header::LOCATION)) => {
            Err(Error::Authentication("Redirected to login".into()))
        },
        401 | 403 => {
            Err(Error::Authentication(status_message(status)))
        },
        400..=599 => {
            Err(Error::Http(status))
        },
        _ => {
            Ok(response.bytes().await?)
        },
    }
}

fn status_message(status: StatusCode) -> String {
    status.canonical_reason()
        .map(|reason| format!("{} {reason}", status.as_u16()))
        .unwrap_or_else(|| status.as_u16().to_string())
}

/// Checks the response and parses its body as JSON.
pub async fn parses_response<D>(response: reqwest::Response) -> Result<D>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;
    
    parse_body(&body)
}

/// Parses a response body, turning Steam's HTML error pages into errors.
pub fn parse_body<D>(body: &[u8]) -> Result<D>
where
    D: DeserializeOwned,
{
    match serde_json::from_slice::<D>(body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(body);
            
            if regex_is_match!(r#"<h1>Sign In</h1>"#, &html) && regex_is_match!(r#"g_steamID = false;"#, &html) {
                Err(Error::Authentication("Not logged in".into()))
            } else if regex_is_match!(r#"<h1>Sorry!</h1>"#, &html) {
                if let Some((_, message)) = regex_captures!("<h3>(.+)</h3>", &html) {
                    Err(Error::UnexpectedResponse(message.into()))
                } else {
                    Err(Error::UnexpectedResponse("Unexpected error".into()))
                }
            } else {
                Err(Error::MalformedResponse(parse_error))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    
    #[derive(Debug, Deserialize)]
    struct Body {
        success: bool,
    }
    
    #[test]
    fn parses_json_body() {
        let body: Body = parse_body(br#"{"success":true}"#).unwrap();
        
        assert!(body.success);
    }
    
    #[test]
    fn sign_in_page_is_authentication_error() {
        let html = br#"<html><h1>Sign In</h1><script>g_steamID = false;</script></html>"#;
        let error = parse_body::<Body>(html).unwrap_err();
        
        assert!(error.is_authentication());
    }
    
    #[test]
    fn sorry_page_carries_message() {
        let html = br#"<html><h1>Sorry!</h1><h3>An error was encountered while processing your request.</h3></html>"#;
        let error = parse_body::<Body>(html).unwrap_err();
        
        assert!(matches!(
            error,
            Error::UnexpectedResponse(message) if message == "An error was encountered while processing your request.",
        ));
    }
    
    #[test]
    fn garbage_is_malformed() {
        let error = parse_body::<Body>(b"<<<garbage").unwrap_err();
        
        assert!(matches!(error, Error::MalformedResponse(_)));
    }
    
    #[test]
    fn wrong_shape_is_malformed() {
        let error = parse_body::<Body>(br#"{"success":"maybe"}"#).unwrap_err();
        
        assert!(error.is_malformed());
    }
    
    #[test]
    fn detects_login_location() {
        let location = header::HeaderValue::from_static("https://steamcommunity.com/login/home/");
        
        assert!(is_login(Some(&location)));
        assert!(!is_login(None));
    }
}
