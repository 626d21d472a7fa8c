//! Exchange-rate lookup
//!
//! A thin client for an exchangerate.host-style service. Unavailability is
//! normal operation here, never fatal: `convert` answers `None` and the
//! caller falls back to a factor of 1.0 and shows no conversion. Successful
//! lookups are memoized with the long cache TTL; rates do not move fast
//! enough to matter for manual entry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;

const HTTP_TIMEOUT_SECS: u64 = 10;

pub struct RateClient {
    client: reqwest::blocking::Client,
    base_url: String,
    ttl: Duration,
    cache: HashMap<(String, String), (Instant, f64)>,
}

impl RateClient {
    pub fn new(base_url: &str, ttl: Duration) -> color_eyre::Result<RateClient> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(RateClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            ttl,
            cache: HashMap::new(),
        })
    }

    /// Conversion factor: 1 unit of `base` in `target`. `None` when the
    /// service cannot answer.
    pub fn convert(&mut self, base: &str, target: &str) -> Option<f64> {
        if base == target {
            return Some(1.0);
        }

        let key = (base.to_string(), target.to_string());
        if let Some((fetched_at, rate)) = self.cache.get(&key) {
            if fetched_at.elapsed() < self.ttl {
                return Some(*rate);
            }
        }

        let rate = self.fetch(base, target)?;
        self.cache.insert(key, (Instant::now(), rate));
        Some(rate)
    }

    fn fetch(&self, base: &str, target: &str) -> Option<f64> {
        let url = format!("{}/convert?from={base}&to={target}", self.base_url);
        let result = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<Value>());

        match result {
            Ok(payload) => {
                let rate = payload.get("result").and_then(|v| v.as_f64());
                if rate.is_none() {
                    tracing::warn!("rate service returned no result for {base}->{target}");
                }
                rate
            }
            Err(e) => {
                tracing::warn!("rate lookup {base}->{target} failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion_needs_no_service() {
        let mut client = RateClient::new("http://127.0.0.1:9", Duration::from_secs(60)).unwrap();
        assert_eq!(client.convert("SEK", "SEK"), Some(1.0));
    }

    #[test]
    fn test_unreachable_service_answers_none() {
        let mut client = RateClient::new("http://127.0.0.1:9", Duration::from_secs(60)).unwrap();
        assert_eq!(client.convert("INR", "SEK"), None);
    }
}
