//! Test helpers: a canned-response HTTP upstream on a loopback port.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use tokio::net::TcpListener;

const FEED_PATH: &str = "/feed.json";

/// A running stub upstream.
pub struct StubUpstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubUpstream {
    /// Answer every feed request with `status` and `body`, after waiting `delay`.
    pub async fn start(status: StatusCode, body: &str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let body = body.to_string();
        let app = Router::new().route(
            FEED_PATH,
            get(move || {
                let counter = Arc::clone(&counter);
                let body = body.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    (status, [(CONTENT_TYPE, "application/json")], body)
                }
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}{FEED_PATH}"),
            hits,
        }
    }

    /// Serve a `200 OK` with `body` immediately.
    pub async fn ok(body: &str) -> Self {
        Self::start(StatusCode::OK, body, Duration::ZERO).await
    }

    /// Number of feed requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Feed payload with three restaurants.
pub const SAMPLE_FEED: &str = r#"{
  "restaurants": [
    {
      "objectId": "R1", "name": "Masala Theory", "address1": "1 Smith St",
      "suburb": "Fitzroy", "open": "11:00am", "close": "10:00pm",
      "imageLink": "https://img.example.com/r1.jpg",
      "cuisines": ["Indian", "Curry"],
      "deals": [
        { "objectId": "D1", "discount": "20", "dineIn": "true", "lightning": "false", "qtyLeft": "5" },
        { "objectId": "D2", "discount": "45", "dineIn": "false", "lightning": "true", "qtyLeft": "2",
          "open": "3:00pm", "close": "9:00pm" }
      ]
    },
    {
      "objectId": "R2", "name": "Cellar Door", "address1": "9 Bourke St",
      "suburb": "CBD", "open": "4:00pm", "close": "1:00am",
      "imageLink": "https://img.example.com/r2.jpg",
      "cuisines": ["Wine Bar"],
      "deals": [
        { "objectId": "D3", "discount": "abc", "dineIn": "true", "lightning": "false", "qtyLeft": "1",
          "start": "5:00pm", "end": "7:00pm" }
      ]
    },
    {
      "objectId": "R3", "name": "Pizza Place", "address1": "3 Lygon St",
      "suburb": "Carlton", "open": "12:00pm", "close": "11:00pm",
      "imageLink": "https://img.example.com/r3.jpg",
      "cuisines": ["Italian", "Pizza"]
    }
  ]
}"#;
