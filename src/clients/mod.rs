pub mod beacon;
pub mod common;
pub mod execution;
pub mod macros;

/// Serves `router` on an ephemeral local port and returns its origin.
#[cfg(test)]
pub(crate) async fn serve_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    format!("http://{addr}")
}
