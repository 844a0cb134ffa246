// src/validate.rs
// =============================================================================
// Confirms that the requested source directory exists before we clone.
//
// Key functionality:
// - Makes one HTTP HEAD request to the directory's browse URL at the tip of
//   the branch (no body download)
// - Any 2xx status counts as "exists"
// - Anything else, including transport errors, is CopyError::NotFound
// - No retry
// =============================================================================

use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::error::{CopyError, Result};

/// Probes `url` with a HEAD request and requires a 2xx answer
pub async fn probe_directory(client: &Client, url: &Url) -> Result<()> {
    info!("Probing {}", url);

    let response = client
        .head(url.clone())
        .send()
        .await
        .map_err(|e| CopyError::NotFound {
            url: url.to_string(),
            reason: describe_error(&e),
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!("Failed to find {}", url);
        return Err(CopyError::NotFound {
            url: url.to_string(),
            reason: format!(
                "HTTP {} ({})",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ),
        });
    }

    Ok(())
}

// Turns a reqwest error into a short human-readable reason
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;

    #[tokio::test]
    async fn test_probe_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(HEAD).path("/pkgsite/+/refs/heads/master/internal/fetch");
            then.status(200);
        });

        let url = Url::parse(&server.url("/pkgsite/+/refs/heads/master/internal/fetch")).unwrap();
        probe_directory(&Client::new(), &url).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_probe_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD);
            then.status(404);
        });

        let url = Url::parse(&server.url("/pkgsite/+/refs/heads/master/missing")).unwrap();
        match probe_directory(&Client::new(), &url).await {
            Err(CopyError::NotFound { reason, .. }) => assert_eq!(reason, "HTTP 404 (Not Found)"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_transport_error() {
        // Nothing listens on port 9 on localhost in a test environment
        let url = Url::parse("http://127.0.0.1:9/pkgsite").unwrap();
        assert!(matches!(
            probe_directory(&Client::new(), &url).await,
            Err(CopyError::NotFound { .. })
        ));
    }
}
