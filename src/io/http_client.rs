use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::domain::models::{ContentSize, HttpInfo};
use crate::error::{AppError, Result};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; SeoinsiktBot/0.2; +https://github.com/dIB59/seo)";

/// Same hop limit reqwest applies by default.
const MAX_REDIRECTS: usize = 10;

/// Response captured by a single GET.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub http: HttpInfo,
    pub body: Vec<u8>,
}

/// Issues exactly one GET per call. No retries, no timeout beyond the transport's.
#[derive(Debug, Clone)]
pub struct HttpClient {
    user_agent: String,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl HttpClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    /// Builds a client whose redirect policy flips `redirected` on the first hop.
    fn create_client(&self, redirected: Arc<AtomicBool>) -> Result<Client> {
        let policy = Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else {
                redirected.store(true, Ordering::Relaxed);
                attempt.follow()
            }
        });

        Client::builder()
            .user_agent(self.user_agent.as_str())
            .redirect(policy)
            .build()
            .map_err(|e| AppError::network(describe(&e)))
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let parsed = Url::parse(url)?;
        tracing::info!("[FETCH] GET {}", parsed);

        // Request-scoped, so concurrent analyses never share it.
        let redirected = Arc::new(AtomicBool::new(false));
        let client = self.create_client(redirected.clone())?;

        let start = Instant::now();
        let response = client.get(parsed.clone()).send().await.map_err(|e| {
            tracing::warn!("[FETCH] Request to {} failed: {}", parsed, describe(&e));
            AppError::network(describe(&e))
        })?;
        let response_time = start.elapsed().as_secs_f64();

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = value
                    .to_str()
                    .map(str::to_string)
                    .unwrap_or_else(|_| String::from_utf8_lossy(value.as_bytes()).into_owned());
                (name.as_str().to_string(), value)
            })
            .collect();

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!("[FETCH] Reading body of {} failed: {}", parsed, describe(&e));
            AppError::network(describe(&e))
        })?;

        let http = HttpInfo {
            status,
            using_https: parsed.scheme() == "https",
            content_size: ContentSize::from_bytes(body.len() as u64),
            headers,
            redirected: redirected.load(Ordering::Relaxed),
            response_time,
            final_url,
        };

        tracing::info!(
            "[FETCH] Complete - status: {}, size: {} bytes, time: {:.3}s, redirected: {}",
            http.status,
            http.content_size.bytes,
            http.response_time,
            http.redirected
        );

        Ok(FetchedPage {
            http,
            body: body.to_vec(),
        })
    }
}

/// Flattens an error and its sources into one line.
fn describe(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
