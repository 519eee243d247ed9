use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use protocol::Role;

use super::*;

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[test]
fn chat_url_joins_without_double_slash() {
    assert_eq!(chat_url("http://127.0.0.1:3000/"), "http://127.0.0.1:3000/api/chat");
    assert_eq!(chat_url("https://chat.example"), "https://chat.example/api/chat");
}

#[tokio::test]
async fn send_posts_history_and_decodes_reply() {
    let router = Router::new().route(
        protocol::CHAT_PATH,
        post(|Json(req): Json<ChatRequest>| async move {
            Json(Message::assistant(format!("got {} messages", req.messages.len())))
        }),
    );
    let transport = HttpTransport::new(&serve(router).await).unwrap();

    let reply = transport
        .send(&[Message::system("seed"), Message::user("hi")])
        .await
        .unwrap();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "got 2 messages");
}

#[tokio::test]
async fn send_maps_error_status() {
    let router = Router::new().route(
        protocol::CHAT_PATH,
        post(|| async {
            (StatusCode::TOO_MANY_REQUESTS, Json(ErrorBody::new("Quota exceeded. Please check your billing and plan.")))
        }),
    );
    let transport = HttpTransport::new(&serve(router).await).unwrap();

    let err = transport.send(&[Message::user("hi")]).await.unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 429, ref message } if message.starts_with("Quota exceeded")));
}

#[tokio::test]
async fn send_rejects_non_message_body() {
    let router = Router::new().route(protocol::CHAT_PATH, post(|| async { Json(serde_json::json!({ "ok": true })) }));
    let transport = HttpTransport::new(&serve(router).await).unwrap();

    let err = transport.send(&[Message::user("hi")]).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn send_reports_connection_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(&format!("http://{addr}")).unwrap();
    let err = transport.send(&[Message::user("hi")]).await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}
