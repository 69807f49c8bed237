//! HttpTransport integration tests against a local mock HTTP server

mod common;

use botwire_client::{BotClient, ClientBuilder, HttpTransport, Transport};
use botwire_core::{BotMethod, Error, GetUpdates};
use common::{failure_envelope, success_envelope, MockHttpServer};
use std::time::Duration;

#[tokio::test]
async fn test_posts_json_parameters_to_token_path() {
    let mut server = MockHttpServer::start(200, success_envelope(serde_json::json!([]))).await;
    let transport = HttpTransport::new(server.url(), "123:abc", Duration::from_secs(5)).unwrap();

    let method = GetUpdates::builder()
        .offset(-5)
        .limit(10)
        .timeout(0)
        .clear_allowed_updates()
        .build();
    let raw = transport.send(method.path(), &method.parameters()).await.unwrap();
    assert_eq!(raw, r#"{"success":true,"result":[]}"#);

    let request = server.next_request().await.unwrap();
    assert_eq!(request.path, "/bot123:abc/getupdates");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        request.body,
        r#"{"offset":-5,"limit":10,"timeout":0,"allowed_updates":[]}"#
    );

    server.shutdown();
}

#[tokio::test]
async fn test_error_status_body_is_returned() {
    let server = MockHttpServer::start(429, failure_envelope(429, "rate limited")).await;
    let client = ClientBuilder::new("123:abc")
        .api_url(server.url())
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let error = client.execute(&GetUpdates::new()).await.unwrap_err();

    match error {
        Error::RemoteRejected(api) => {
            assert_eq!(api.error_code, Some(429));
            assert_eq!(api.description, "rate limited");
        }
        other => panic!("Expected RemoteRejected, got {:?}", other),
    }

    server.shutdown();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(
        format!("http://{}", addr),
        "123:secret-token",
        Duration::from_secs(2),
    )
    .unwrap();
    let client = BotClient::new(transport);

    let error = client.execute(&GetUpdates::new()).await.unwrap_err();

    assert!(error.is_transport());
    assert!(!error.to_string().contains("secret-token"));
}
