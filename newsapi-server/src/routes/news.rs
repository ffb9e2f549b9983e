//! News endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use newsapi_core::News;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Query parameters for listing news
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    /// Fetch from NewsAPI before answering
    #[serde(default)]
    pub reload: bool,
}

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/news", get(list_news))
        .route("/v1/news/{id}", get(get_news))
}

/// GET /v1/news?reload=<bool> - All stored news, optionally reloading first
async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<NewsQuery>,
) -> Result<Json<Vec<News>>, ApiError> {
    if params.reload {
        info!("Reload requested");
    }

    let news = state.news_service.list(params.reload).await?;
    Ok(Json(news))
}

/// GET /v1/news/{id} - One stored news by identity
async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<News>, ApiError> {
    let news = state.news_service.get(id)?;
    Ok(Json(news))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use newsapi_core::news_id;
    use newsapi_services::NewsStorage;

    use crate::routes::app;
    use crate::routes::test_support::{get, raw, state, FixedSource};

    #[tokio::test]
    async fn test_list_without_reload_is_empty() {
        let storage = Arc::new(NewsStorage::new_in_memory().unwrap());
        let source = Arc::new(FixedSource(vec![raw("Never fetched", "Some Author")]));
        let app = app(state(storage, Some(source)));

        let (status, body) = get(app, "/v1/news").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_reload_then_list() {
        let storage = Arc::new(NewsStorage::new_in_memory().unwrap());

        // three records already stored
        let seeded = app(state(
            storage.clone(),
            Some(Arc::new(FixedSource(vec![
                raw("First gadget", "Author One"),
                raw("Second gadget", "Author Two"),
                raw("Third gadget", "Author Three"),
            ]))),
        ));
        let (_, body) = get(seeded, "/v1/news?reload=true").await;
        let previous = body.as_array().unwrap().len();
        assert_eq!(previous, 3);

        // two of three share (title, source, author) with stored records
        let app = app(state(
            storage,
            Some(Arc::new(FixedSource(vec![
                raw("First gadget", "Author One"),
                raw("Fourth gadget", "Author Four"),
                raw("Third gadget", "Author Three"),
            ]))),
        ));
        let (status, body) = get(app.clone(), "/v1/news?reload=true").await;
        assert_eq!(status, StatusCode::OK);

        let items = body.as_array().unwrap();
        assert_eq!(items.len(), previous + 1);
        assert_eq!(items[3]["title"], "Fourth gadget");
        assert_eq!(items[3]["source"], "Engadget");
        assert_eq!(items[3]["urlImage"], "https://s.yimg.com/story.jpg");
        assert_eq!(items[3]["publishedAt"], "2021-11-05T13:00:00-03:00");
        assert_eq!(
            items[3]["id"],
            news_id("Fourth gadget", "Engadget", "Author Four")
        );

        // a plain listing afterwards sees the same records
        let (_, body) = get(app, "/v1/news?reload=false").await;
        assert_eq!(body.as_array().unwrap().len(), previous + 1);
    }

    #[tokio::test]
    async fn test_reload_without_key_still_lists() {
        let storage = Arc::new(NewsStorage::new_in_memory().unwrap());
        let app = app(state(storage, None));

        let (status, body) = get(app, "/v1/news?reload=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let storage = Arc::new(NewsStorage::new_in_memory().unwrap());
        let app = app(state(
            storage,
            Some(Arc::new(FixedSource(vec![raw("Folding phones", "Cherlynn Low")]))),
        ));
        get(app.clone(), "/v1/news?reload=true").await;

        let id = news_id("Folding phones", "Engadget", "Cherlynn Low");
        let (status, body) = get(app, &format!("/v1/news/{}", id)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["author"], "Cherlynn Low");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let storage = Arc::new(NewsStorage::new_in_memory().unwrap());
        let app = app(state(storage, None));

        let (status, body) = get(app, "/v1/news/123456789").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "News not found :(");
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_error() {
        let db_path = std::env::temp_dir().join(format!(
            "newsapi-server-broken-{}.db",
            std::process::id()
        ));
        let storage = Arc::new(NewsStorage::new(&db_path).unwrap());
        let app = app(state(storage, None));

        rusqlite::Connection::open(&db_path)
            .unwrap()
            .execute_batch("DROP TABLE news;")
            .unwrap();

        let (status, body) = get(app.clone(), "/v1/news").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Internal error"));

        let (status, body) = get(app, "/v1/news/42").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());

        let _ = std::fs::remove_file(&db_path);
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_is_bad_request() {
        let storage = Arc::new(NewsStorage::new_in_memory().unwrap());
        let app = app(state(storage, None));

        let (status, _) = get(app, "/v1/news/latest").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
