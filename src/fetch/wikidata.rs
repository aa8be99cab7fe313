use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use super::EntityFetcher;
use crate::config::WikidataConfig;
use crate::entity::EntityId;
use crate::error::{Result, WikigraphError};

/// Blocking client for the `wbgetentities` action of the Wikidata API
pub struct WikidataFetcher {
    client: Client,
    api_url: Url,
}

impl WikidataFetcher {
    /// Create a new fetcher
    ///
    /// # Arguments
    ///
    /// * `api_url` - Action API endpoint, e.g. "https://www.wikidata.org/w/api.php"
    /// * `user_agent` - Value for the `User-Agent` header
    pub fn new(api_url: &str, user_agent: &str) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| WikigraphError::Config(format!("Invalid api_url {}: {}", api_url, e)))?;

        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self { client, api_url })
    }

    pub fn from_config(config: &WikidataConfig) -> Result<Self> {
        Self::new(&config.api_url, &config.user_agent)
    }

    /// Lookup URL for a single entity
    pub fn request_url(&self, id: &EntityId) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "wbgetentities")
            .append_pair("ids", id.as_str())
            .append_pair("format", "json");
        url
    }
}

impl EntityFetcher for WikidataFetcher {
    fn fetch(&self, id: &EntityId) -> Result<Value> {
        let url = self.request_url(id);
        log::debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(WikigraphError::Fetch {
                url: url.to_string(),
                body,
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer exactly one request with a canned response; returns the api url.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}/w/api.php", addr), handle)
    }

    #[test]
    fn test_request_url_has_wbgetentities_params() {
        let fetcher = WikidataFetcher::new("https://www.wikidata.org/w/api.php", "test/1.0").unwrap();
        let url = fetcher.request_url(&EntityId::new("q42"));
        assert_eq!(
            url.as_str(),
            "https://www.wikidata.org/w/api.php?action=wbgetentities&ids=Q42&format=json"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = WikidataFetcher::new("not a url", "test/1.0");
        assert!(matches!(result, Err(WikigraphError::Config(_))));
    }

    #[test]
    fn test_fetch_success_returns_body() {
        let (api_url, handle) = serve_once(
            "200 OK",
            r#"{"entities":{"Q42":{"id":"Q42","labels":{"en":{"language":"en","value":"Douglas Adams"}}}}}"#,
        );
        let fetcher = WikidataFetcher::new(&api_url, "wikigraph-test/1.0").unwrap();

        let body = fetcher.fetch(&EntityId::new("Q42")).unwrap();
        assert_eq!(
            body["entities"]["Q42"]["labels"]["en"]["value"],
            "Douglas Adams"
        );

        let request = handle.join().unwrap();
        assert!(request.starts_with("GET /w/api.php?action=wbgetentities&ids=Q42&format=json"));
        assert!(request.to_lowercase().contains("user-agent: wikigraph-test/1.0"));
    }

    #[test]
    fn test_fetch_non_success_is_fetch_error_with_body() {
        let (api_url, handle) = serve_once("503 Service Unavailable", "maintenance window");
        let fetcher = WikidataFetcher::new(&api_url, "wikigraph-test/1.0").unwrap();

        let err = fetcher.fetch(&EntityId::new("Q1")).unwrap_err();
        match err {
            WikigraphError::Fetch { url, body } => {
                assert!(url.contains("ids=Q1"));
                assert_eq!(body, "maintenance window");
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }
        handle.join().unwrap();
    }

    #[test]
    fn test_fetch_invalid_json_is_json_error() {
        let (api_url, handle) = serve_once("200 OK", "<html>oops</html>");
        let fetcher = WikidataFetcher::new(&api_url, "wikigraph-test/1.0").unwrap();

        let err = fetcher.fetch(&EntityId::new("Q1")).unwrap_err();
        assert!(matches!(err, WikigraphError::Json(_)));
        handle.join().unwrap();
    }
}
