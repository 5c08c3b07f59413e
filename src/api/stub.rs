/// In-process stand-in for the OCR backend, used by tests

use axum::Router;
use tokio::net::TcpListener;

use super::client::OcrClient;

/// Serve `router` on an ephemeral local port and return a client for it.
pub async fn spawn(router: Router) -> OcrClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    OcrClient::new(format!("http://{}", addr))
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable() -> OcrClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    OcrClient::new(format!("http://{}", addr))
}
