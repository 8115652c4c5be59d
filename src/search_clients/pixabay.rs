use crate::config::AppConfig;
use crate::error::AppError;
use crate::search::{ImageItem, ImageSearcher, ResultPage};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("image-gallery/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    total: u64,
    #[serde(rename = "totalHits")]
    total_hits: u64,
    hits: Vec<ImageItem>,
}

#[derive(Debug)]
pub struct PixabaySearcher {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    per_page: u32,
}

impl PixabaySearcher {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        log::debug!("Creating Pixabay client for URL: {}", config.api_url);
        let endpoint = Url::parse(&config.api_url)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        log::trace!("Pixabay client created successfully.");
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            per_page: config.per_page,
        })
    }
}

#[async_trait]
impl ImageSearcher for PixabaySearcher {
    async fn search_images(&self, query: &str, page: u32) -> Result<ResultPage, AppError> {
        log::debug!("Fetching page {} for query '{}'", page, query);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .query(&[("page", page), ("per_page", self.per_page)])
            .query(&[
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("safesearch", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("Provider throttled the request for '{}'", query);
            return Err(AppError::RateLimited);
        }
        if !status.is_success() {
            return Err(AppError::RequestFailed(format!(
                "provider returned status {}",
                status
            )));
        }

        let body: PixabayResponse = response.json().await?;
        log::debug!(
            "Received {} hits for '{}' ({} total, {} reachable)",
            body.hits.len(),
            query,
            body.total,
            body.total_hits
        );

        Ok(ResultPage {
            items: body.hits,
            total: body.total,
            total_hits: body.total_hits,
        })
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type SeenParams = web::Data<Mutex<Vec<HashMap<String, String>>>>;

    fn test_config(api_url: String) -> AppConfig {
        AppConfig {
            api_url,
            api_key: "test-key".into(),
            per_page: 40,
            request_timeout_secs: 5,
            web_port: 0,
            log_level: "debug".into(),
        }
    }

    async fn stub_api(query: web::Query<HashMap<String, String>>, seen: SeenParams) -> HttpResponse {
        let params = query.into_inner();
        seen.lock().unwrap().push(params.clone());

        match params.get("q").map(String::as_str) {
            Some("throttled") => HttpResponse::TooManyRequests().finish(),
            Some("broken") => HttpResponse::InternalServerError().finish(),
            Some("nothing") => HttpResponse::Ok().json(json!({
                "total": 0,
                "totalHits": 0,
                "hits": [],
            })),
            _ => HttpResponse::Ok().json(json!({
                "total": 500,
                "totalHits": 85,
                "hits": [{
                    "webformatURL": "https://cdn.example.com/small.jpg",
                    "largeImageURL": "https://cdn.example.com/large.jpg",
                    "tags": "cat, pet",
                    "likes": 10,
                    "views": 20,
                    "comments": 3,
                    "downloads": 7,
                    "id": 42,
                    "user": "someone",
                }],
            })),
        }
    }

    /// Spin up a loopback server standing in for the external API.
    async fn start_stub() -> (String, SeenParams) {
        let seen: SeenParams = web::Data::new(Mutex::new(Vec::new()));
        let seen_for_app = seen.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(seen_for_app.clone())
                .service(web::resource("/api/").route(web::get().to(stub_api)))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        (format!("http://{}/api/", addr), seen)
    }

    #[actix_web::test]
    async fn sends_the_provider_query_parameters() {
        let (url, seen) = start_stub().await;
        let searcher = PixabaySearcher::new(&test_config(url)).unwrap();

        searcher.search_images("cats", 3).await.unwrap();

        let seen = seen.lock().unwrap();
        let params = &seen[0];
        assert_eq!(params.get("key").unwrap(), "test-key");
        assert_eq!(params.get("q").unwrap(), "cats");
        assert_eq!(params.get("page").unwrap(), "3");
        assert_eq!(params.get("per_page").unwrap(), "40");
        assert_eq!(params.get("image_type").unwrap(), "photo");
        assert_eq!(params.get("orientation").unwrap(), "horizontal");
        assert_eq!(params.get("safesearch").unwrap(), "true");
    }

    #[actix_web::test]
    async fn parses_a_result_page() {
        let (url, _seen) = start_stub().await;
        let searcher = PixabaySearcher::new(&test_config(url)).unwrap();

        let page = searcher.search_images("cats", 1).await.unwrap();

        assert_eq!(page.total, 500);
        assert_eq!(page.total_hits, 85);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].webformat_url, "https://cdn.example.com/small.jpg");
        assert_eq!(page.items[0].large_image_url, "https://cdn.example.com/large.jpg");
        assert_eq!(page.items[0].tags, "cat, pet");
        assert_eq!(page.items[0].downloads, 7);
    }

    #[actix_web::test]
    async fn parses_a_zero_result_page() {
        let (url, _seen) = start_stub().await;
        let searcher = PixabaySearcher::new(&test_config(url)).unwrap();

        let page = searcher.search_images("nothing", 1).await.unwrap();

        assert_eq!(page.total, 0);
        assert_eq!(page.total_hits, 0);
        assert!(page.items.is_empty());
    }

    #[actix_web::test]
    async fn maps_throttling_to_rate_limited() {
        let (url, _seen) = start_stub().await;
        let searcher = PixabaySearcher::new(&test_config(url)).unwrap();

        let err = searcher.search_images("throttled", 1).await.unwrap_err();

        assert!(matches!(err, AppError::RateLimited));
    }

    #[actix_web::test]
    async fn maps_other_statuses_to_request_failed() {
        let (url, _seen) = start_stub().await;
        let searcher = PixabaySearcher::new(&test_config(url)).unwrap();

        let err = searcher.search_images("broken", 1).await.unwrap_err();

        assert!(matches!(err, AppError::RequestFailed(_)));
    }

    #[test]
    fn rejects_an_invalid_endpoint() {
        let err = PixabaySearcher::new(&test_config("not a url".into())).unwrap_err();
        assert!(matches!(err, AppError::Url(_)));
    }
}
