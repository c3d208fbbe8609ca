// Random-quote client with a hardcoded safety net
use serde::Deserialize;
use thiserror::Error;

const QUOTE_API_URL: &str = "https://api.quotable.io/random";

/// Shown whenever the fetch fails for any reason - network down, non-2xx
/// status, unparseable body. The page never surfaces a quote error.
pub const FALLBACK_QUOTE: &str =
    "\"Keep your face always toward the sunshine.\" \u{2014} Walt Whitman";

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Quote endpoint returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

/// One quote as the endpoint serves it
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub content: String,
    pub author: String,
}

impl Quote {
    /// Display form: the text in quotes, an em dash, the author
    pub fn display(&self) -> String {
        format!("\"{}\" \u{2014} {}", self.content, self.author)
    }
}

pub struct QuoteClient {
    client: reqwest::Client,
    api_url: String,
}

impl QuoteClient {
    pub fn new() -> Self {
        Self::with_api_url(QUOTE_API_URL.to_string())
    }

    /// For self-hosted endpoints or testing with a local server
    pub fn with_api_url(api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("startpage/0.1.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, api_url }
    }

    /// One GET, no retry; errors are the caller's problem
    ///
    /// Decoding goes through serde_json directly so a broken body is
    /// distinguishable from a transport failure.
    pub async fn fetch(&self) -> Result<Quote> {
        let response = self.client.get(&self.api_url).send().await?;

        if !response.status().is_success() {
            return Err(QuoteError::BadStatus(response.status()));
        }

        let body = response.bytes().await?;
        let quote: Quote = serde_json::from_slice(&body)?;
        Ok(quote)
    }

    /// The display string for the page footer; never fails
    ///
    /// Any fetch failure is logged and swallowed into the fixed fallback
    /// text. No retry, no caching of the last success.
    pub async fn fetch_or_fallback(&self) -> String {
        match self.fetch().await {
            Ok(quote) => quote.display(),
            Err(e) => {
                tracing::warn!("Quote fetch failed, using fallback: {}", e);
                FALLBACK_QUOTE.to_string()
            }
        }
    }
}

impl Default for QuoteClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port, then hang up
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/random", addr)
    }

    #[test]
    fn test_display_formatting() {
        let quote = Quote {
            content: "Simplicity is the soul of efficiency.".to_string(),
            author: "Austin Freeman".to_string(),
        };
        assert_eq!(
            quote.display(),
            "\"Simplicity is the soul of efficiency.\" \u{2014} Austin Freeman"
        );
    }

    #[test]
    fn test_fallback_literal() {
        assert_eq!(
            FALLBACK_QUOTE,
            "\"Keep your face always toward the sunshine.\" \u{2014} Walt Whitman"
        );
    }

    #[tokio::test]
    async fn test_success_parses_content_and_author() {
        let url = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"content":"Go placidly.","author":"Max Ehrmann"}"#,
        )
        .await;

        let client = QuoteClient::with_api_url(url);
        let shown = client.fetch_or_fallback().await;
        assert_eq!(shown, "\"Go placidly.\" \u{2014} Max Ehrmann");
    }

    #[tokio::test]
    async fn test_http_500_yields_exact_fallback() {
        let url = one_shot_server("HTTP/1.1 500 Internal Server Error", "").await;

        let client = QuoteClient::with_api_url(url);
        let shown = client.fetch_or_fallback().await;
        assert_eq!(
            shown,
            "\"Keep your face always toward the sunshine.\" \u{2014} Walt Whitman"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_fallback() {
        // Bind then drop a listener so the port refuses connections
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = QuoteClient::with_api_url(format!("http://{}/random", addr));
        assert_eq!(client.fetch_or_fallback().await, FALLBACK_QUOTE);
    }

    #[tokio::test]
    async fn test_garbage_body_yields_fallback() {
        let url = one_shot_server("HTTP/1.1 200 OK", "not json!").await;

        let client = QuoteClient::with_api_url(url);
        assert_eq!(client.fetch_or_fallback().await, FALLBACK_QUOTE);
    }

    #[tokio::test]
    async fn test_garbage_body_is_a_parse_error_not_transport() {
        let url = one_shot_server("HTTP/1.1 200 OK", "not json!").await;

        let client = QuoteClient::with_api_url(url);
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, QuoteError::ParseError(_)));
    }
}
