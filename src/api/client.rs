use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use yansi::Paint;

use super::error::GrafanaError;
use crate::utils::{absolute_url, mask_secrets};

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        eprintln!("{}", msg);
    }
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body as echoed: masked when it is JSON, verbatim otherwise.
fn echo_body(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(v) => serde_json::to_string(&mask_secrets(&v)).unwrap_or_default(),
        Err(_) => text.to_string(),
    }
}

/// Grafana server administrator credentials, sent as a basic-auth header.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub user: String,
    pub password: Secret<String>,
}

/// Status code and raw body of a completed call.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, GrafanaError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Authenticated client for the Grafana HTTP API.
/// One instance is built per run and reused for every call.
#[derive(Debug, Clone)]
pub struct GrafanaClient {
    http: reqwest::Client,
    base_url: String,
    credentials: AdminCredentials,
}

impl GrafanaClient {
    pub fn new(
        base_url: &str,
        credentials: AdminCredentials,
        timeout: Duration,
    ) -> Result<Self, GrafanaError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("grafprov/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Core request function.
    /// Handles authentication, JSON bodies and request echoing; status
    /// interpretation is left to the caller since it differs per endpoint.
    pub async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse, GrafanaError> {
        let url = absolute_url(&self.base_url, endpoint);
        let body = body.map(serde_json::to_value).transpose()?;

        self.echo_request(&method, &url, body.as_ref(), params);

        let mut req = self
            .http
            .request(method, &url)
            .basic_auth(&self.credentials.user, Some(self.credentials.password.expose_secret()));

        if let Some(p) = params {
            req = req.query(p);
        }

        if let Some(ref b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        // Grayed out so the request line stays the focus
        log_output(format!(
            "Response:\n{}",
            Paint::new(format!("HTTP {} {}", status.as_u16(), echo_body(&text))).rgb(100, 100, 100)
        ));

        Ok(ApiResponse { status, body: text })
    }

    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse, GrafanaError> {
        self.call::<Value>(Method::GET, endpoint, None, params).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse, GrafanaError> {
        self.call(Method::POST, endpoint, Some(body), None).await
    }

    /// Print the call as an equivalent curl command, with credentials masked.
    fn echo_request(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        params: Option<&[(&str, &str)]>,
    ) {
        let mut url_for_log = url.to_string();
        if let Some(p) = params {
            if !p.is_empty() {
                let query_string = p
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                    .collect::<Vec<String>>()
                    .join("&");
                url_for_log = format!("{}?{}", url_for_log, query_string);
            }
        }

        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));
        parts.push(format!(
            "{} {}",
            Paint::new("-u").fg(yansi::Color::Magenta),
            Paint::new(format!("'{}:***'", self.credentials.user)).fg(yansi::Color::Magenta)
        ));

        if let Some(b) = body {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
            ));
            let json_str = serde_json::to_string(&mask_secrets(b)).unwrap_or_default();
            let escaped_json = json_str.replace('\'', "'\\''");
            parts.push(format!(
                "{} {}",
                Paint::new("-d").fg(yansi::Color::Blue),
                Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
            ));
        }
        log_output(format!("Request:\n{}", parts.join(" ")));
    }
}
