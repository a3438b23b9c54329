use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use sift_core::BatchProcessor;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
struct AppState {
    processor: BatchProcessor,
}

#[derive(Debug, Default, Deserialize)]
struct ProcessRequest {
    #[serde(default)]
    urls: Vec<String>,
}

pub fn router(processor: BatchProcessor) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/process", post(process))
        .with_state(AppState { processor })
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(addr: &str, processor: BatchProcessor) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "server.listening");

    axum::serve(listener, router(processor))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("server.shutdown");
        })
        .await
        .context("server error")
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn process(State(state): State<AppState>, Json(req): Json<ProcessRequest>) -> Response {
    match state.processor.process(&req.urls).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => {
            tracing::error!(error = %e, urls = req.urls.len(), "process.failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use sift_common::SiftError;
    use sift_config::FilterConfig;
    use sift_core::{Extractor, FilterSet};
    use sift_nlp::{Entity, EntityLabel, EntityRecognizer, RuleSegmenter};
    use sift_web::{FetchedPage, PageFetcher};
    use std::sync::Arc;

    struct OnePage;

    #[async_trait]
    impl PageFetcher for OnePage {
        async fn fetch(&self, url: &str) -> FetchedPage {
            if url == "http://pib/ok" {
                FetchedPage {
                    title: "Cabinet".into(),
                    content: "Posted On: 12 Jan 2024\nThe Cabinet approved a ₹500 crore outlay for rural roads this year.".into(),
                }
            } else {
                FetchedPage::failed(url, "connection refused")
            }
        }
    }

    struct BrokenRecognizer;

    impl EntityRecognizer for BrokenRecognizer {
        fn recognize(&self, _text: &str) -> sift_common::Result<Vec<Entity>> {
            Err(SiftError::Model("model not loaded".into()))
        }
        fn supported_labels(&self) -> Vec<EntityLabel> {
            EntityLabel::ALL.to_vec()
        }
        fn name(&self) -> &str {
            "broken"
        }
    }

    fn filters() -> FilterSet {
        FilterSet::from_config(&FilterConfig::default()).unwrap()
    }

    async fn spawn(extractor: Extractor) -> String {
        let processor = BatchProcessor::new(Arc::new(extractor), Arc::new(OnePage));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(processor)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn index_serves_form() {
        let base = spawn(Extractor::with_defaults(filters())).await;
        let resp = reqwest::get(&base).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.text().await.unwrap().contains("/process"));
    }

    #[tokio::test]
    async fn process_returns_results_in_order() {
        let base = spawn(Extractor::with_defaults(filters())).await;
        let body: Value = reqwest::Client::new()
            .post(format!("{base}/process"))
            .json(&json!({ "urls": ["http://gone", "http://pib/ok"] }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            body,
            json!([
                {"title": "http://gone", "lines": [["Error: connection refused", {"entities": [], "keywords": []}]]},
                {"title": "Cabinet", "lines": [[
                    "The Cabinet approved a ₹500 crore outlay for rural roads this year.",
                    {"entities": ["₹500 crore"], "keywords": ["approved"]}
                ]]}
            ])
        );
    }

    #[tokio::test]
    async fn missing_urls_means_empty_batch() {
        let base = spawn(Extractor::with_defaults(filters())).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/process"))
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.json::<Value>().await.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn pipeline_fault_is_500() {
        let extractor = Extractor::new(filters(), Arc::new(RuleSegmenter::new()), Arc::new(BrokenRecognizer));
        let base = spawn(extractor).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/process"))
            .json(&json!({ "urls": ["http://pib/ok"] }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Model error: model not loaded");
    }
}
