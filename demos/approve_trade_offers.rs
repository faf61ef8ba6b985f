use steam_mobileconf::{ConfirmationClient, SteamID};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (steamid, identity_secret, cookies) = get_session();
    let client = ConfirmationClient::builder(steamid)
        .identity_secret(identity_secret)
        .cookies(cookies)
        .build()?;
    
    client.sync_time_offset().await?;
    
    let confirmations = client.list_pending().await?;
    
    for confirmation in &confirmations {
        println!("{confirmation}");
    }
    
    let accepted = client.approve_all_trade_offers().await?;
    
    println!("Accepted {} trade offer(s)", accepted.len());
    
    Ok(())
}

/// Gets session from environment variables.
fn get_session() -> (SteamID, String, Vec<String>) {
    dotenv::dotenv().ok();
    
    let steamid = std::env::var("STEAMID").expect("STEAMID missing")
        .parse::<u64>()
        .expect("STEAMID is not a valid SteamID");
    let identity_secret = std::env::var("IDENTITY_SECRET").expect("IDENTITY_SECRET missing");
    let cookies = std::env::var("COOKIES").expect("COOKIES missing")
        .split('&')
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    
    (SteamID::from(steamid), identity_secret, cookies)
}
