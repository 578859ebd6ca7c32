//! End-to-end decision tests for the gate.
//!
//! Each test stands up a real server on a loopback port with a
//! deterministic stub resolver and drives it over HTTP.

use std::sync::Arc;

use common::{start_gate, StubResolver};

mod common;

async fn status_for_header(handle: &common::GateHandle, header: Option<&str>) -> u16 {
    let client = reqwest::Client::new();
    let mut request = client.get(format!("http://{}", handle.addr));
    if let Some(value) = header {
        request = request.header("X-Forwarded-For", value);
    }
    request.send().await.expect("gate unreachable").status().as_u16()
}

#[tokio::test]
async fn test_missing_header_is_forbidden() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    assert_eq!(status_for_header(&gate, None).await, 403);
}

#[tokio::test]
async fn test_malformed_entry_is_forbidden() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    assert_eq!(
        status_for_header(&gate, Some("192.0.2.10, not-an-ip, 10.0.0.1")).await,
        403
    );
}

#[tokio::test]
async fn test_allowed_client_behind_trusted_proxy() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}", gate.addr))
        .header("X-Forwarded-For", "192.0.2.10, 10.0.0.1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().is_empty()); // status only, no body
}

#[tokio::test]
async fn test_unknown_client_is_forbidden() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    assert_eq!(
        status_for_header(&gate, Some("203.0.113.9, 10.0.0.1")).await,
        403
    );
}

#[tokio::test]
async fn test_all_trusted_chain_is_a_server_error() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1", "10.0.0.2"], &["app.example.org"], resolver).await;

    assert_eq!(
        status_for_header(&gate, Some("10.0.0.1, 10.0.0.2")).await,
        500
    );
    // Singleton all-trusted chains behave the same.
    assert_eq!(status_for_header(&gate, Some("10.0.0.1")).await, 500);
}

#[tokio::test]
async fn test_scan_is_rightmost_first() {
    // The leftmost entry would be allowed, but the rightmost untrusted hop
    // is the candidate and it is not in any resolved set.
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    assert_eq!(
        status_for_header(&gate, Some("192.0.2.10, 198.51.100.7, 10.0.0.1")).await,
        403
    );
}

#[tokio::test]
async fn test_second_domain_match_allows() {
    let resolver = Arc::new(
        StubResolver::new()
            .with("first.example.org", &["198.51.100.1"])
            .with("second.example.org", &["192.0.2.10"]),
    );
    let gate = start_gate(
        &["10.0.0.1"],
        &["first.example.org", "second.example.org"],
        resolver,
    )
    .await;

    assert_eq!(
        status_for_header(&gate, Some("192.0.2.10, 10.0.0.1")).await,
        200
    );
}

#[tokio::test]
async fn test_failing_first_domain_aborts_even_when_second_would_match() {
    let resolver = Arc::new(
        StubResolver::new()
            .failing("first.example.org")
            .with("second.example.org", &["192.0.2.10"]),
    );
    let gate = start_gate(
        &["10.0.0.1"],
        &["first.example.org", "second.example.org"],
        resolver,
    )
    .await;

    assert_eq!(
        status_for_header(&gate, Some("192.0.2.10, 10.0.0.1")).await,
        500
    );
}

#[tokio::test]
async fn test_ipv4_mapped_forms_are_equivalent() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["::ffff:192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    assert_eq!(
        status_for_header(&gate, Some("::ffff:192.0.2.10, ::ffff:10.0.0.1")).await,
        200
    );
}

#[tokio::test]
async fn test_method_agnostic() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    let client = reqwest::Client::new();
    for builder in [
        client.post(format!("http://{}/anything", gate.addr)),
        client.head(format!("http://{}", gate.addr)),
    ] {
        let response = builder
            .header("X-Forwarded-For", "192.0.2.10, 10.0.0.1")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }
}

#[tokio::test]
async fn test_concurrent_requests_do_not_interfere() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;
    let addr = gate.addr;

    let mut handles = Vec::new();
    for i in 0..32 {
        let allowed = i % 2 == 0;
        handles.push(tokio::spawn(async move {
            let header = if allowed {
                "192.0.2.10, 10.0.0.1"
            } else {
                "203.0.113.9, 10.0.0.1"
            };
            let status = reqwest::Client::new()
                .get(format!("http://{}", addr))
                .header("X-Forwarded-For", header)
                .send()
                .await
                .unwrap()
                .status()
                .as_u16();
            (allowed, status)
        }));
    }

    for handle in handles {
        let (allowed, status) = handle.await.unwrap();
        assert_eq!(status, if allowed { 200 } else { 403 });
    }
}

#[tokio::test]
async fn test_identical_requests_are_idempotent() {
    let resolver = Arc::new(StubResolver::new().with("app.example.org", &["192.0.2.10"]));
    let gate = start_gate(&["10.0.0.1"], &["app.example.org"], resolver).await;

    for _ in 0..5 {
        assert_eq!(
            status_for_header(&gate, Some("192.0.2.10, 10.0.0.1")).await,
            200
        );
    }
}
