//! One-shot HTTP responder used by the adapter tests in place of the token
//! endpoint and the Firestore REST API.

use std::collections::HashMap;

use business::domain::credentials::model::ServiceAccountKey;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub(crate) const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_private_key.pem");
pub(crate) const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/test_public_key.pem");

#[derive(Debug)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Accepts one connection per canned response, in order, and returns the
/// requests it received once all responses are sent.
pub(crate) async fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<RecordedRequest>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut recorded = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            recorded.push(read_request(&mut stream).await);
            let response = format!(
                "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
        recorded
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request headers were complete");
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buffer[header_end..]).to_string();

    RecordedRequest {
        method,
        path,
        headers,
        body,
    }
}

/// Key signed with the fixture RSA key, exchanging tokens at `token_uri`.
pub(crate) fn test_key(token_uri: &str) -> ServiceAccountKey {
    ServiceAccountKey {
        project_id: "invisibl333".to_string(),
        private_key_id: Some("test-key-id".to_string()),
        private_key: TEST_PRIVATE_KEY.to_string(),
        client_email: "firebase-adminsdk@invisibl333.iam.gserviceaccount.com".to_string(),
        client_id: Some("1234567890".to_string()),
        token_uri: token_uri.to_string(),
    }
}
