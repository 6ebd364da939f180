use reqwest::Url;

/// Base URL with any `user:password@` userinfo removed, plus the
/// credentials that were embedded in it
#[derive(Debug, PartialEq, Eq)]
pub struct SplitUrl {
    pub url: String,
    pub credentials: Option<(String, String)>,
}

/// Parse a base URL and lift embedded credentials out of it.
/// Only http and https are accepted.
pub fn split_credentials(raw: &str) -> Result<SplitUrl, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }

    let credentials = if url.username().is_empty() {
        None
    } else {
        let user = decode(url.username());
        let pass = url.password().map(decode).unwrap_or_default();
        Some((user, pass))
    };

    if url.set_username("").is_err() || url.set_password(None).is_err() {
        return Err("cannot strip credentials from URL".to_string());
    }

    Ok(SplitUrl {
        url: url.as_str().trim_end_matches('/').to_string(),
        credentials,
    })
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}
