use std::time::Duration;

use mapcodec_core::error::RetrievalError;
use mapcodec_core::sources::{HttpSource, source_for};
use mapcodec_core::{Decoder, Encoder, MapCodecError};
use mapcodec_core_common::ArtifactSource;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// Serves exactly one HTTP response and returns the URL to request.
async fn serve_once(status: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = vec![0u8; 8192];
        let mut read = 0;
        loop {
            let n = socket.read(&mut request[read..]).await.unwrap();
            read += n;
            if n == 0 || request[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/korea.compressed.txt")
}

#[tokio::test]
async fn fetches_and_decodes_over_http() {
    let dataset = json!({"regions": [{"name": "Seoul", "points": [[0, 0], [1, 1]]}]});
    let artifact = Encoder::default().encode_value(&dataset).unwrap().artifact;
    let url = serve_once("200 OK", artifact.into_bytes()).await;

    let source = source_for(&url, Duration::from_secs(5)).unwrap();
    let decoded = Decoder::default().fetch_and_decode(source.as_ref()).await.unwrap();
    assert_eq!(decoded, dataset);
}

#[tokio::test]
async fn non_success_status_is_retrieval_error() {
    let url = serve_once("404 Not Found", b"missing".to_vec()).await;
    let source = HttpSource::new(Url::parse(&url).unwrap(), Duration::from_secs(5)).unwrap();

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, RetrievalError::Status { status: 404, .. }));

    let err = Decoder::default().fetch_and_decode(&source).await.unwrap_err();
    assert!(matches!(
        err,
        MapCodecError::Retrieval(RetrievalError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/korea.compressed.txt")).unwrap();
    let source = HttpSource::new(url, Duration::from_secs(5)).unwrap();
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, RetrievalError::Network { .. }));
}

#[tokio::test]
async fn stalled_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let url = Url::parse(&format!("http://{addr}/korea.compressed.txt")).unwrap();
    let source = HttpSource::new(url, Duration::from_millis(200)).unwrap();
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, RetrievalError::Timeout { .. }));
}
