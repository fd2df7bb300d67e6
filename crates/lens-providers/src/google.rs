//! Google Custom Search JSON API client.

use std::time::Duration;

use lens_config::SearchConfig;

use crate::{ProviderError, SearchHit, SearchProvider, http::build_client, http::check_response};

const USER_AGENT: &str = concat!("lens/", env!("CARGO_PKG_VERSION"));

/// Largest `num` accepted by the API.
const MAX_NUM: usize = 10;

#[derive(serde::Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(serde::Deserialize)]
struct CustomSearchItem {
    #[serde(default)]
    title: String,
    link: Option<String>,
    #[serde(default)]
    snippet: String,
}

pub struct GoogleSearchClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_client(USER_AGENT, Duration::from_secs(config.timeout_secs))?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            engine_id: config.engine_id.clone(),
        })
    }

    fn request_url(&self, query: &str, num: usize) -> String {
        format!(
            "{}?key={}&cx={}&q={}&num={num}",
            self.endpoint,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.engine_id),
            urlencoding::encode(query),
        )
    }
}

impl SearchProvider for GoogleSearchClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, ProviderError> {
        let num = max_results.clamp(1, MAX_NUM);
        let resp = check_response(self.http.get(self.request_url(query, num)).send().await?).await?;

        let data: CustomSearchResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let hits = into_hits(data, num);
        tracing::debug!(query, hits = hits.len(), "custom search returned");
        Ok(hits)
    }
}

/// Map API items to hits, dropping items without a link.
fn into_hits(data: CustomSearchResponse, limit: usize) -> Vec<SearchHit> {
    data.items
        .into_iter()
        .filter_map(|item| {
            let url = item.link.filter(|l| !l.trim().is_empty())?;
            Some(SearchHit {
                title: item.title,
                url,
                snippet: item.snippet,
            })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "kind": "customsearch#search",
        "items": [
            {
                "title": "Working at Acme | Glassdoor",
                "link": "https://www.glassdoor.com/Reviews/Acme-Reviews-E1.htm",
                "snippet": "Acme employees rate work-life balance 3.9 out of 5."
            },
            {
                "title": "Acme | LinkedIn",
                "link": "https://www.linkedin.com/company/acme"
            },
            {
                "title": "No link here",
                "snippet": "dropped"
            }
        ]
    }"#;

    #[test]
    fn maps_items_to_hits() {
        let data: CustomSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let hits = into_hits(data, 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://www.glassdoor.com/Reviews/Acme-Reviews-E1.htm");
        assert_eq!(hits[1].snippet, "");
    }

    #[test]
    fn missing_items_is_empty_success() {
        let data: CustomSearchResponse =
            serde_json::from_str(r#"{"kind":"customsearch#search","searchInformation":{}}"#)
                .unwrap();
        assert!(into_hits(data, 10).is_empty());
    }

    #[test]
    fn request_url_encodes_query() {
        let client = GoogleSearchClient::new(&SearchConfig {
            api_key: "k".into(),
            engine_id: "cx:1".into(),
            ..Default::default()
        })
        .unwrap();
        let url = client.request_url("\"Acme\" work life balance", 2);
        assert_eq!(
            url,
            "https://www.googleapis.com/customsearch/v1?key=k&cx=cx%3A1&q=%22Acme%22%20work%20life%20balance&num=2"
        );
    }

    #[tokio::test]
    #[ignore] // requires network and LENS_SEARCH__* credentials
    async fn live_search() {
        let config = SearchConfig {
            api_key: std::env::var("LENS_SEARCH__API_KEY").unwrap_or_default(),
            engine_id: std::env::var("LENS_SEARCH__ENGINE_ID").unwrap_or_default(),
            ..Default::default()
        };
        let client = GoogleSearchClient::new(&config).unwrap();
        let hits = client.search("Google company culture", 2).await.unwrap();
        for hit in &hits {
            println!("{} ({})", hit.title, hit.url);
        }
    }
}
