use quiz_crawler::{CrawlerConfig, Fetcher, HttpFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Answers a single request with `response` and returns the url to hit.
async fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}/test/1")
}

#[tokio::test]
async fn non_2xx_response_is_an_error() {
    let url = serve_once("HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n").await;
    let mut fetcher = HttpFetcher::new(&CrawlerConfig::default()).unwrap();

    let err = fetcher.fetch(&url).await.unwrap_err();

    assert!(err.to_string().contains(&url));
    assert!(format!("{err:#}").contains("404"));
}

#[tokio::test]
async fn successful_response_returns_body() {
    let url = serve_once(
        "HTTP/1.1 200 OK\r\ncontent-type: text/html; charset=utf-8\r\ncontent-length: 14\r\nconnection: close\r\n\r\n<h1>Test1</h1>",
    )
    .await;
    let mut fetcher = HttpFetcher::new(&CrawlerConfig::default()).unwrap();

    let page = fetcher.fetch(&url).await.unwrap();

    assert_eq!(page, "<h1>Test1</h1>");
}
