use folio_cli::github::GithubClient;
use folio_core::config::PortfolioConfig;
use folio_core::error::RATE_LIMIT_MESSAGE;
use folio_core::timeline::load_timeline;
use folio_core::{EventSource, FetchError, GenerationCounter, TimelineView};
use serde_json::json;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GithubClient {
    let mut config = PortfolioConfig::default();
    config.github.api_base = server.uri();
    config.calendar.contributions_api = format!("{}/v4", server.uri());
    GithubClient::from_config(&config).expect("client")
}

#[tokio::test]
async fn fetches_events_with_fixed_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ferris/events"))
        .and(query_param("per_page", "100"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "1",
                "type": "PushEvent",
                "created_at": "2026-10-16T10:00:00Z",
                "repo": { "name": "ferris/crab" },
                "payload": { "size": 1 }
            },
            {
                "id": "2",
                "type": "WatchEvent",
                "created_at": "2026-10-16T09:00:00Z",
                "repo": { "name": "ferris/crab" },
                "payload": { "action": "started" }
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let events = client.fetch_events("ferris").await.expect("events");
    assert_eq!(events.len(), 2);

    let counter = GenerationCounter::new();
    let ticket = counter.begin();
    let state = load_timeline(&client, &ticket, "ferris")
        .await
        .expect("current ticket");
    let TimelineView::Items(items) = state.view(10) else {
        panic!("expected items");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sentence(), "Pushed 1 commit to ferris/crab");
}

#[tokio::test]
async fn forbidden_response_shows_rate_limit_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ferris/events"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string("API rate limit exceeded for 127.0.0.1."),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.fetch_events("ferris").await.expect_err("403");
    assert_eq!(
        error,
        FetchError::status(403, "API rate limit exceeded for 127.0.0.1.")
    );

    let counter = GenerationCounter::new();
    let ticket = counter.begin();
    let state = load_timeline(&client, &ticket, "ferris")
        .await
        .expect("current ticket");
    assert_eq!(
        state.view(100),
        TimelineView::Error(RATE_LIMIT_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn other_failures_carry_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/nobody/events"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.fetch_events("nobody").await.expect_err("404");
    assert_eq!(error.to_string(), "HTTP 404: Not Found");
    assert!(!error.is_rate_limited());
}

#[tokio::test]
async fn fetches_last_year_contributions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/ferris"))
        .and(query_param("y", "last"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": { "lastYear": 3 },
            "contributions": [
                { "date": "2026-10-15", "count": 1, "level": 1 },
                { "date": "2026-10-16", "count": 2, "level": 3 }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let contributions = client
        .fetch_contributions("ferris")
        .await
        .expect("contributions");
    assert_eq!(contributions.len(), 2);
    assert_eq!(contributions[1].count, 2);
}
