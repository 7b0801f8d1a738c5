use std::net::SocketAddr;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio_test::assert_ok;

use socialpulse::{routes, Config, SessionStore};

const UPLOAD: &str = "\
Date,Platform,Sentiment,Location,Engagements,Media Type
2025-01-06,Instagram,Positive,Jakarta,100,Video
2025-01-07,TikTok,Negative,Bandung,50,Image
2025-01-08,Instagram,Neutral,Jakarta,30,Video
bad-date,X,Positive,Bali,999,Text
2025-01-14,X,Positive,Surabaya,n/a,Text
2025-01-15,TikTok,Positive,Bali,20,Video
";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    dataset_id: String,
    stats: Stats,
    filters: Value,
}

#[derive(Debug, Deserialize)]
struct Stats {
    rows_read: usize,
    rows_dropped: usize,
    engagements_zero_filled: usize,
}

/// Serve the app on an ephemeral port and return its base URL.
async fn spawn_app() -> Result<String> {
    // ---
    let config = Config {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        max_upload_bytes: 64 * 1024,
        max_sessions: 8,
    };
    let app = routes::router(SessionStore::new(config.max_sessions), config.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{addr}"))
}

async fn upload(client: &Client, base: &str, body: &str) -> Result<reqwest::Response> {
    // ---
    Ok(client
        .post(format!("{base}/datasets"))
        .header("content-type", "text/csv")
        .body(body.to_string())
        .send()
        .await?)
}

#[tokio::test]
async fn upload_then_dashboard() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let response = upload(&client, &base, UPLOAD).await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let uploaded: UploadResponse = response.json().await?;

    // 1) Row-level problems only show up as counters
    assert_eq!(uploaded.stats.rows_read, 6);
    assert_eq!(uploaded.stats.rows_dropped, 1);
    assert_eq!(uploaded.stats.engagements_zero_filled, 1);
    assert_eq!(uploaded.filters["platforms"], serde_json::json!(["Instagram", "TikTok", "X"]));
    assert_eq!(uploaded.filters["first_date"], "2025-01-06");

    // 2) Unfiltered dashboard carries all five charts
    let url = format!("{base}/datasets/{}/dashboard", uploaded.dataset_id);
    let dashboard: Value = client.get(&url).send().await?.json().await?;

    assert_eq!(dashboard["status"], "ok");
    assert_eq!(dashboard["rows"], 5);
    let charts = dashboard["charts"].as_array().expect("charts array");
    assert_eq!(charts.len(), 5);

    let platform_total: u64 = charts[2]["summary"]["entries"]
        .as_array()
        .expect("platform entries")
        .iter()
        .map(|e| e["engagements"].as_u64().unwrap_or_default())
        .sum();
    assert_eq!(platform_total, 200);

    assert_eq!(
        charts[4]["insights"][0],
        "**Jakarta** is the top location with **130** engagements."
    );

    // 3) Filters narrow the view
    let filtered: Value = client
        .get(&url)
        .query(&[("platform", "TikTok"), ("start", "2025-01-07"), ("end", "2025-01-31")])
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(filtered["status"], "ok");
    assert_eq!(filtered["rows"], 2);

    // 4) A selection with no rows is a notice, not an error
    let response = client.get(&url).query(&[("location", "Nowhere")]).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let empty: Value = response.json().await?;
    assert_eq!(empty["status"], "no_data");
    assert_eq!(empty["notice"], "No data matches the selected filters.");

    Ok(())
}

#[tokio::test]
async fn upload_errors_are_reported_once() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let missing = "Date,Platform,Sentiment\n2025-01-06,X,positive\n";
    let response = upload(&client, &base, missing).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "schema");
    assert_eq!(
        body["error"]["message"],
        "Uploaded file is missing required column(s): location, engagements, media_type"
    );

    let ragged = "Date,Platform,Sentiment,Location,Engagements,Media Type\n2025-01-06,X\n";
    let response = upload(&client, &base, ragged).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "input_format");

    Ok(())
}

#[tokio::test]
async fn dataset_lifecycle() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let uploaded: UploadResponse = upload(&client, &base, UPLOAD).await?.json().await?;
    let dataset = format!("{base}/datasets/{}", uploaded.dataset_id);

    let filters = assert_ok!(client.get(format!("{dataset}/filters")).send().await);
    assert_eq!(filters.status(), StatusCode::OK);

    let inverted = client
        .get(format!("{dataset}/dashboard"))
        .query(&[("start", "2025-02-01"), ("end", "2025-01-01")])
        .send()
        .await?;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);

    let deleted = client.delete(&dataset).send().await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = client.get(format!("{dataset}/dashboard")).send().await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn health_and_contact() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let health: Value = client.get(format!("{base}/health")).send().await?.json().await?;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["datasets"], 0);

    let response = client
        .post(format!("{base}/contact"))
        .json(&serde_json::json!({ "name": "Ayu", "email": "", "message": "Hi" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .post(format!("{base}/contact"))
        .json(&serde_json::json!({ "name": "Ayu", "email": "ayu@example.com", "message": "Hi" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert!(body["message"].as_str().unwrap_or_default().starts_with("Thank you, Ayu!"));

    Ok(())
}
