use thiserror::Error;
use url::Url;

/// Reasons an entry link is refused before handing it to the browser.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Validate a feed-supplied link before opening it in the system browser.
///
/// Feed content is untrusted, so only `http`/`https` links with a host are
/// accepted; `file://`, `javascript:` and similar are rejected.
///
/// ```
/// use feedreader::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://example.com/post").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
