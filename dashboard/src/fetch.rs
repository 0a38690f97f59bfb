use lanecore::{Fetcher, PollError, PollResult, RawResponse};
use std::error::Error as _;

/// `reqwest`-backed transport; on `wasm32` this is the browser's `fetch`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> PollResult<RawResponse> {
        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

fn transport(err: reqwest::Error) -> PollError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    PollError::Transport(message)
}
