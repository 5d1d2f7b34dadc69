//! HTTP client tests against a mock report endpoint.

use super::*;
use mockito::{Matcher, Server};

const PATH: &str = "/demo_data";

#[test]
fn fetch_sends_api_key_and_decodes_report() {
    let mut server = Server::new();
    let endpoint = server
        .mock("GET", PATH)
        .match_query(Matcher::UrlEncoded("api_key".into(), "secret-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"report":{"campaigns":[{"name":"Spring Promo","type":"Paid","metrics":{"clicks":12}}]}}"#,
        )
        .expect(1)
        .create();

    let client = ReportClient::new(
        format!("{}{PATH}", server.url()),
        Some("secret-key".to_string()),
        None,
    )
    .unwrap();
    let report = client.fetch().unwrap();

    endpoint.assert();
    assert_eq!(report.campaigns()[0].clicks(), Some(12));
}

#[test]
fn wrong_api_key_does_not_match() {
    let mut server = Server::new();
    let endpoint = server
        .mock("GET", PATH)
        .match_query(Matcher::UrlEncoded("api_key".into(), "secret-key".into()))
        .with_status(200)
        .with_body(r#"{"report":{"campaigns":[]}}"#)
        .expect(0)
        .create();

    let client = ReportClient::new(
        format!("{}{PATH}", server.url()),
        Some("other-key".to_string()),
        None,
    )
    .unwrap();

    // Unmatched requests get mockito's 501.
    let err = client.fetch().unwrap_err();
    endpoint.assert();
    assert_eq!(err.to_string(), "Network response was not ok");
}

#[test]
fn non_success_status_is_network_not_ok() {
    let mut server = Server::new();
    let _endpoint = server
        .mock("GET", PATH)
        .with_status(500)
        .with_body("{}")
        .create();
    let client = ReportClient::new(format!("{}{PATH}", server.url()), None, None).unwrap();

    let err = client.fetch().unwrap_err();

    assert_eq!(err.to_string(), "Network response was not ok");
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
}

#[test]
fn invalid_body_is_a_decode_error() {
    let mut server = Server::new();
    let _endpoint = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body("<html>")
        .create();
    let client = ReportClient::new(format!("{}{PATH}", server.url()), None, None).unwrap();

    let err = client.fetch().unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn query_fetches_over_http_in_background() {
    let mut server = Server::new();
    let endpoint = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(r#"{"report":{"campaigns":[{"name":"A"}]}}"#)
        .expect(1)
        .create();
    let client = ReportClient::new(format!("{}{PATH}", server.url()), None, None).unwrap();
    let mut query = ReportQuery::new(ReportSource::Http(client));

    let state = query.wait();
    assert_eq!(state.data().map(|loaded| loaded.report.campaigns().len()), Some(1));
    endpoint.assert();
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    // Nothing listens on port 1.
    let client = ReportClient::new("http://127.0.0.1:1/demo_data", None, None).unwrap();

    let err = client.fetch().unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}
