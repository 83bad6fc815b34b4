use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use movie_search::{MovieApi, PageController, PageState, TopK};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::views;

type Controller<A> = Arc<PageController<A>>;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub query: String,
    pub top_k: u32,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub question: String,
    pub query: Option<String>,
    pub top_k: Option<u32>,
}

pub fn router<A: MovieApi + 'static>(controller: Controller<A>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/", get(show_page::<A>))
        .route("/search", post(run_search::<A>))
        .route("/ask", post(run_ask::<A>))
        .route("/api/state", get(page_state::<A>).layer(cors))
        .route("/health", get(health))
        .with_state(controller)
}

async fn show_page<A: MovieApi>(State(controller): State<Controller<A>>) -> Html<String> {
    let state = controller.snapshot().await;
    Html(views::page(&state))
}

async fn page_state<A: MovieApi>(State(controller): State<Controller<A>>) -> Json<PageState> {
    Json(controller.snapshot().await)
}

async fn run_search<A: MovieApi + 'static>(
    State(controller): State<Controller<A>>,
    Form(form): Form<SearchForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let top_k = parse_top_k(form.top_k)?;

    controller.set_top_k(top_k).await;
    controller.set_query(form.query.clone()).await;

    if form.query.trim().is_empty() {
        log::info!("Ignoring search with a blank query");
    } else {
        // Detached so a dropped connection cannot strand `loading`.
        let task = tokio::spawn(async move { controller.search().await });
        match task.await {
            Ok(outcome) => log::info!("Search finished: {:?}", outcome),
            Err(e) => log::error!("Search task failed: {}", e),
        }
    }

    Ok(Redirect::to("/"))
}

async fn run_ask<A: MovieApi + 'static>(
    State(controller): State<Controller<A>>,
    Form(form): Form<AskForm>,
) -> Result<Redirect, (StatusCode, String)> {
    if let Some(top_k) = form.top_k {
        controller.set_top_k(parse_top_k(top_k)?).await;
    }
    if let Some(query) = form.query {
        controller.set_query(query).await;
    }
    controller.set_question(form.question.clone()).await;

    if form.question.trim().is_empty() {
        log::info!("Ignoring ask with a blank question");
    } else {
        let task = tokio::spawn(async move { controller.ask().await });
        match task.await {
            Ok(outcome) => log::info!("Ask finished: {:?}", outcome),
            Err(e) => log::error!("Ask task failed: {}", e),
        }
    }

    Ok(Redirect::to("/"))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn parse_top_k(value: u32) -> Result<TopK, (StatusCode, String)> {
    TopK::new(value).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}
