#![deny(rust_2018_idioms, unused, unused_import_braces, unused_qualifications, warnings)]

use {
    std::{
        fmt,
        io::{
            self,
            prelude::*
        },
        thread,
        time::Duration
    },
    derive_more::From,
    reqwest::{
        StatusCode,
        header::ACCEPT
    },
    url::Url,
    crate::model::{
        Card,
        SearchResult
    }
};

pub mod model;
pub mod render;
pub mod repl;

pub const SEARCH_ENDPOINT: &str = "https://api.scryfall.com/cards/search";

/// Pause after every successful search, keeping a session well under the API's request rate limit.
pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, From)]
pub enum Error {
    /// The API answered with a status other than 200 or 429. Carries the response body.
    #[from(ignore)]
    Api(StatusCode, String),
    Decode(serde_json::Error),
    #[from(ignore)]
    Input(io::Error),
    /// Reading the body of a successful response failed.
    #[from(ignore)]
    Io(io::Error),
    Network(reqwest::Error),
    RateLimited,
    #[from(ignore)]
    Terminal(io::Error),
    UrlParse(url::ParseError)
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api(status, body) => write!(f, "API returned status {}: {}", status, body),
            Error::Decode(e) => write!(f, "failed to parse JSON: {}", e),
            Error::Input(e) => write!(f, "{}", e),
            Error::Io(e) => write!(f, "failed to read response: {}", e),
            Error::Network(e) => write!(f, "failed to make request: {}", e),
            Error::RateLimited => write!(f, "rate limited by Scryfall API"),
            Error::Terminal(e) => write!(f, "failed to write output: {}", e),
            Error::UrlParse(e) => write!(f, "invalid search endpoint: {}", e)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api(..) | Error::RateLimited => None,
            Error::Decode(e) => Some(e),
            Error::Input(e) | Error::Io(e) | Error::Terminal(e) => Some(e),
            Error::Network(e) => Some(e),
            Error::UrlParse(e) => Some(e)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    /// Value of the `order` query parameter.
    pub order: String,
    pub delay: Duration,
    pub user_agent: String
}

impl Default for Config {
    fn default() -> Config {
        Config {
            endpoint: SEARCH_ENDPOINT.to_owned(),
            order: "name".to_owned(),
            delay: RATE_LIMIT_DELAY,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned()
        }
    }
}

/// Anything that can turn a query into a list of cards.
pub trait CardSearch {
    fn search(&mut self, query: &str) -> Result<Vec<Card>, Error>;
}

pub struct Client {
    config: Config,
    http: reqwest::blocking::Client
}

impl Client {
    pub fn new(config: Config) -> Result<Client, Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Client { config, http })
    }

    /// The endpoint with the query and sort order attached as form-encoded parameters.
    pub fn search_url(&self, query: &str) -> Result<Url, Error> {
        Ok(Url::parse_with_params(&self.config.endpoint, &[
            ("q", query),
            ("order", self.config.order.as_str())
        ])?)
    }
}

impl CardSearch for Client {
    /// Sends one search request. There is no retry: a failed search must be issued again by the caller.
    fn search(&mut self, query: &str) -> Result<Vec<Card>, Error> {
        let url = self.search_url(query)?;
        log::debug!("GET {}", url);
        let response = self.http.get(url)
            .header(ACCEPT, "application/json")
            .send()?;
        let result = decode_response(response.status(), response)?;
        log::debug!("{} of {} cards returned (has_more: {})", result.data.len(), result.total_cards, result.has_more);
        if let Some(ref next_page) = result.next_page {
            log::debug!("next page not requested: {}", next_page);
        }
        log::trace!("sleeping {:?} before returning", self.config.delay);
        thread::sleep(self.config.delay);
        Ok(result.data)
    }
}

/// Classifies a response by status and decodes the body of a successful one.
pub fn decode_response(status: StatusCode, mut body: impl Read) -> Result<SearchResult, Error> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        log::warn!("rate limited by Scryfall API");
        return Err(Error::RateLimited)
    }
    let mut response_content = Vec::default();
    if status != StatusCode::OK {
        // the body is only informational here
        let _ = body.read_to_end(&mut response_content);
        log::warn!("Scryfall API responded with status code {}", status);
        return Err(Error::Api(status, String::from_utf8_lossy(&response_content).into_owned()))
    }
    body.read_to_end(&mut response_content).map_err(Error::Io)?;
    Ok(serde_json::from_slice(&response_content)?)
}

#[cfg(test)]
mod tests {
    use {
        std::time::Instant,
        super::*
    };

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
        }
    }

    #[test]
    fn rate_limited() {
        let err = decode_response(StatusCode::TOO_MANY_REQUESTS, &b"slow down"[..]).unwrap_err();
        assert!(matches!(err, Error::RateLimited));
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn other_status_keeps_body() {
        let body = r#"{"object":"error","code":"not_found","status":404}"#;
        match decode_response(StatusCode::NOT_FOUND, body.as_bytes()) {
            Err(Error::Api(status, response_body)) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(response_body, body);
            }
            r => panic!("expected API error, got {:?}", r)
        }
    }

    #[test]
    fn error_body_read_failure_is_still_api_error() {
        match decode_response(StatusCode::INTERNAL_SERVER_ERROR, FailingReader) {
            Err(Error::Api(status, response_body)) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(response_body.is_empty());
            }
            r => panic!("expected API error, got {:?}", r)
        }
    }

    #[test]
    fn body_read_failure() {
        assert!(matches!(decode_response(StatusCode::OK, FailingReader), Err(Error::Io(_))));
    }

    #[test]
    fn malformed_json() {
        let err = decode_response(StatusCode::OK, &b"{\"data\": ["[..]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().starts_with("failed to parse JSON"));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = decode_response(StatusCode::OK, &b"{\"data\": [\xff]}"[..]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn error_body_is_kept_lossily() {
        match decode_response(StatusCode::BAD_GATEWAY, &b"<html>bad gateway \xff</html>"[..]) {
            Err(Error::Api(status, response_body)) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(response_body.starts_with("<html>bad gateway "));
                assert!(response_body.ends_with("</html>"));
            }
            r => panic!("expected API error, got {:?}", r)
        }
    }

    #[test]
    fn empty_result() {
        let result = decode_response(StatusCode::OK, &br#"{"data": []}"#[..]).unwrap();
        assert!(result.data.is_empty());
    }

    #[test]
    fn search_url_encodes_query() {
        let client = Client::new(Config::default()).unwrap();
        let url = client.search_url("lightning bolt o:\"3 damage\"").unwrap();
        assert_eq!(url.host_str(), Some("api.scryfall.com"));
        assert_eq!(url.path(), "/cards/search");
        let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
        assert_eq!(pairs, vec![
            ("q".to_owned(), "lightning bolt o:\"3 damage\"".to_owned()),
            ("order".to_owned(), "name".to_owned())
        ]);
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn invalid_endpoint() {
        let client = Client::new(Config { endpoint: "not a url".to_owned(), ..Config::default() }).unwrap();
        assert!(matches!(client.search_url("bolt"), Err(Error::UrlParse(_))));
    }

    fn closed_port(delay: Duration) -> Client {
        Client::new(Config {
            endpoint: "http://127.0.0.1:9/cards/search".to_owned(),
            delay,
            ..Config::default()
        }).unwrap()
    }

    #[test]
    fn connection_refused_is_a_network_error() {
        let err = closed_port(Duration::from_millis(0)).search("bolt").unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert!(err.to_string().starts_with("failed to make request"));
    }

    #[test]
    fn failed_search_skips_the_delay() {
        let delay = Duration::from_secs(5);
        let start = Instant::now();
        assert!(closed_port(delay).search("bolt").is_err());
        assert!(start.elapsed() < delay);
    }
}
