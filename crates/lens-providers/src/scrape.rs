//! Page fetcher: downloads a page and reduces it to visible text.

use std::time::Duration;

use lens_config::ScrapeConfig;
use lens_core::text::truncate_chars;
use scraper::{Html, Node};

use crate::{PageFetcher, ProviderError, http::build_client, http::check_response};

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

pub struct HttpPageFetcher {
    http: reqwest::Client,
    max_chars: usize,
}

impl HttpPageFetcher {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_client(&config.user_agent, Duration::from_secs(config.timeout_secs))?,
            max_chars: config.max_chars,
        })
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<Option<String>, ProviderError> {
        let resp = check_response(self.http.get(url).send().await?).await?;

        if !is_textual(&resp) {
            tracing::debug!(url, "skipping non-text content");
            return Ok(None);
        }

        let html = resp.text().await?;
        let text = html_to_text(&html);
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(truncate_chars(&text, self.max_chars).to_string()))
    }
}

fn is_textual(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_none_or(|ct| {
            let ct = ct.to_ascii_lowercase();
            ct.contains("html") || ct.starts_with("text/")
        })
}

/// Reduce an HTML document to its visible text, one trimmed phrase per line.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        lines.extend(
            text.lines()
                .flat_map(|line| line.split("  "))
                .map(str::trim)
                .filter(|phrase| !phrase.is_empty()),
        );
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn drops_scripts_and_styles() {
        let html = r#"<html><head><title>Acme</title><style>p { color: red }</style></head>
            <body>
              <h1>Acme Careers</h1>
              <script>var tracking = 1;</script>
              <p>Flexible   hours.  Strong mentoring.</p>
              <noscript>Enable JS</noscript>
            </body></html>"#;
        assert_eq!(
            html_to_text(html),
            "Acme Careers\nFlexible\nhours.\nStrong mentoring."
        );
    }

    #[test]
    fn blank_document_is_empty() {
        assert_eq!(html_to_text("<html><body>   \n </body></html>"), "");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("just text"), "just text");
    }

    #[test]
    fn content_type_gate() {
        let pdf = reqwest::Response::from(
            ::http::Response::builder()
                .header("Content-Type", "application/pdf")
                .body("")
                .unwrap(),
        );
        let html = reqwest::Response::from(
            ::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body("")
                .unwrap(),
        );
        let missing = reqwest::Response::from(::http::Response::builder().body("").unwrap());
        assert!(!is_textual(&pdf));
        assert!(is_textual(&html));
        assert!(is_textual(&missing));
    }
}
