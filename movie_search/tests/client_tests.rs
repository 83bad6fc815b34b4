use movie_search::{ClientConfig, ClientError, MovieApi, Outcome, PageController, SearchClient, TopK};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn movie(movie_id: i64, score: f64) -> Value {
    json!({
        "doc_id": format!("tmdb_{}", movie_id),
        "movie_id": movie_id,
        "title": format!("Movie {}", movie_id),
        "year": 2010,
        "genres": ["Science Fiction", "Drama"],
        "rating": 8.1,
        "vote_count": 1200,
        "overview": "Astronauts leave a dying Earth.",
        "score": score
    })
}

fn search_body(query: &str, top_k: u32, count: i64) -> Value {
    json!({
        "query": query,
        "top_k": top_k,
        "model_name": "sentence-transformers/all-MiniLM-L6-v2",
        "num_docs": 200,
        "results": (1..=count).map(|id| movie(id, 0.9 - id as f64 * 0.01)).collect::<Vec<_>>()
    })
}

fn qa_body(citations: Value) -> Value {
    json!({
        "question": "Which is the most hopeful?",
        "query": "space",
        "top_k": 5,
        "llm_model": "gpt-5.2",
        "answer": "Movie 1 ends on a hopeful note [1].",
        "citations": citations,
        "results_used": [movie(1, 0.9), movie(2, 0.8)]
    })
}

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::new(ClientConfig::new(server.uri()).unwrap())
}

#[tokio::test]
async fn search_posts_json_with_default_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({
            "query": "space",
            "top_k": 5,
            "model_name": "sentence-transformers/all-MiniLM-L6-v2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("space", 5, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .search("space", TopK::new(5).unwrap(), None)
        .await
        .unwrap();

    assert_eq!(response.results.len(), 5);
    assert_eq!(response.num_docs, 200);
    assert_eq!(response.results[0].movie_id, 1);
}

#[tokio::test]
async fn ask_posts_both_models() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/qa"))
        .and(body_json(json!({
            "question": "Which is the most hopeful?",
            "query": "space",
            "top_k": 5,
            "model_name": "sentence-transformers/all-MiniLM-L6-v2",
            "llm_model": "gpt-5.2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(qa_body(json!([
            {"ref": "[1]", "title": "Movie 1", "movie_id": 1}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let answer = client_for(&server)
        .ask("Which is the most hopeful?", "space", TopK::new(5).unwrap(), None, None)
        .await
        .unwrap();

    assert_eq!(answer.citations.len(), 1);
    assert_eq!(answer.citations[0].reference, "[1]");
    assert_eq!(answer.results_used.len(), 2);
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/qa"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.search("space", TopK::default(), None).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    let message = err.to_string();
    assert!(message.contains("500") && message.contains("internal error"));

    let err = client.ask("q", "space", TopK::default(), None, None).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("500") && message.contains("internal error"));
}

#[tokio::test]
async fn error_envelope_on_success_is_a_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Query is empty."})))
        .mount(&server)
        .await;

    let err = client_for(&server).search(" ", TopK::default(), None).await.unwrap_err();
    assert!(matches!(err, ClientError::Backend(ref m) if m == "Query is empty."));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": "nope"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/qa"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.search("space", TopK::default(), None).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { endpoint: "search", .. }));

    let err = client.ask("q", "space", TopK::default(), None, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { endpoint: "qa", .. }));
}

#[tokio::test]
async fn citation_outside_evidence_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/qa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(qa_body(json!([
            {"ref": "[9]", "title": "Elsewhere", "movie_id": 99}
        ]))))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .ask("q", "space", TopK::new(5).unwrap(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Invalid { endpoint: "qa", .. }));
}

#[tokio::test]
async fn health_reports_backend_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    assert!(client_for(&server).health().await.unwrap().is_ok());
}

#[tokio::test]
async fn ask_with_empty_results_searches_then_answers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({
            "query": "space",
            "top_k": 5,
            "model_name": "sentence-transformers/all-MiniLM-L6-v2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("space", 5, 3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/qa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(qa_body(json!([]))))
        .expect(2)
        .mount(&server)
        .await;

    let controller = PageController::new(client_for(&server));
    controller.set_query("space").await;
    controller.set_top_k(TopK::new(5).unwrap()).await;
    controller.set_question("Which is the most hopeful?").await;

    assert_eq!(controller.ask().await, Outcome::Applied);

    let page = controller.snapshot().await;
    assert_eq!(page.results.len(), 3);
    assert!(page.citations.is_empty());
    assert!(page.answer.unwrap().contains("hopeful"));

    // Second ask reuses the results on screen, so only /qa is hit again.
    assert_eq!(controller.ask().await, Outcome::Applied);
}

#[tokio::test]
async fn per_call_models_override_config_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({
            "query": "space",
            "top_k": 5,
            "model_name": "intfloat/e5-small-v2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("space", 5, 1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/qa"))
        .and(body_json(json!({
            "question": "Which is the most hopeful?",
            "query": "space",
            "top_k": 5,
            "model_name": "sentence-transformers/all-MiniLM-L6-v2",
            "llm_model": "gpt-4o-mini"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(qa_body(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let top_k = TopK::new(5).unwrap();

    client
        .search("space", top_k, Some("intfloat/e5-small-v2"))
        .await
        .unwrap();
    client
        .ask("Which is the most hopeful?", "space", top_k, None, Some("gpt-4o-mini"))
        .await
        .unwrap();
}
