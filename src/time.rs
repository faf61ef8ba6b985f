//! Time helpers. Confirmation keys are only accepted within a short window of Steam's clock.

use std::time::{SystemTime, UNIX_EPOCH};
use chrono::{DateTime, Utc};

/// A timestamp as reported by Steam.
pub type ServerTime = DateTime<Utc>;

/// Current system time as a unix timestamp in seconds.
pub fn get_system_time() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs() as i64,
        // should never occur
        Err(_) => 0,
    }
}

/// Current time on Steam's servers, given how many seconds the local clock is behind.
pub fn server_time(time_offset: i64) -> i64 {
    get_system_time() + time_offset
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn applies_time_offset() {
        let before = get_system_time();
        let time = server_time(30);
        let after = get_system_time();
        
        assert!(time >= before + 30);
        assert!(time <= after + 30);
    }
}
