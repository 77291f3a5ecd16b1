//! Blocking HTTP GET returning the full response body.
//!
//! Font assets are small enough to buffer in memory, so there is no
//! streaming. Runs in the current thread; call from `spawn_blocking` if
//! used from async code.

use std::time::Duration;

/// Transport options for a single GET.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Overall request timeout; `None` leaves libcurl's default (no limit).
    pub request_timeout: Option<Duration>,
    /// Redirect hop limit.
    pub max_redirects: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: None,
            max_redirects: 10,
        }
    }
}

/// GET failure: transport-level error or a non-2xx status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// libcurl reported an error (connect refused, DNS, timeout).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Response completed with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Performs one GET and returns the full body.
///
/// Follows redirects up to the configured limit. Any status outside 2xx is
/// an error; error-page bodies are never handed back as asset bytes. The
/// `Easy` handle lives for this call only.
pub fn fetch_blocking(url: &str, opts: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirects)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some(t) = opts.request_timeout {
        easy.timeout(t)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code < 200 || code >= 300 {
        return Err(FetchError::Http(code));
    }

    Ok(body)
}
