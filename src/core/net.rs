// src/core/net.rs
// Blocking HTTP. Every caller is a sequential sweep with its own pause between
// requests, so there is no connection pooling policy or retry here.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// The two request shapes the scrapers need. `Http` is the real implementation;
/// tests substitute canned responses.
pub trait Fetch {
    /// GET `url` with `query` appended, returning the body text.
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String>;

    /// POST `form` url-encoded to `url`, returning the body text.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}

pub struct Http {
    client: Client,
}

impl Http {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

fn body(resp: Response) -> Result<String> {
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status { status: status.as_u16(), url: resp.url().to_string() });
    }
    Ok(resp.text()?)
}

impl Fetch for Http {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        logd!("GET {url} {query:?}");
        body(self.client.get(url).query(query).send()?)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        logd!("POST {url} {form:?}");
        body(self.client.post(url).form(form).send()?)
    }
}
