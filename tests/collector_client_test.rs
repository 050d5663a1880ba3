//! Collector client integration tests
//!
//! Runs the blocking client against a minimal canned HTTP responder on
//! the loopback interface; no external services involved.

use agentation::collector::{AnnotationStatus, CollectorClient};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Consume one HTTP request and answer 200 with the given JSON body.
fn serve_one(stream: &mut TcpStream, body: &str) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    loop {
        let n = stream.read(&mut tmp).expect("read request");
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_string();
            let content_length = headers
                .lines()
                .find_map(|line| {
                    line.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .and_then(|v| v.trim().parse::<usize>().ok())
                })
                .unwrap_or(0);
            let mut remaining = content_length.saturating_sub(buf.len() - (pos + 4));
            while remaining > 0 {
                let n = stream.read(&mut tmp).expect("read body");
                if n == 0 {
                    break;
                }
                remaining = remaining.saturating_sub(n);
            }
            break;
        }
        if n == 0 {
            break;
        }
    }
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).expect("write response");
}

/// Spawn a responder that answers the given bodies in order, then stops.
fn spawn_responder(bodies: Vec<String>) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        for body in bodies {
            let (mut stream, _) = listener.accept().expect("accept");
            serve_one(&mut stream, &body);
        }
    });
    (format!("http://{addr}"), handle)
}

#[test]
fn test_status_check_and_connect() {
    let (url, handle) = spawn_responder(vec!["{\"ok\":true}".to_string(), "{}".to_string()]);
    let mut client = CollectorClient::new(&url);

    assert!(client.check_status());
    assert!(client.status().connected);
    assert!(client.status().last_error.is_none());

    let session = client.connect(Some("fixed-session".to_string())).unwrap();
    assert_eq!(session, "fixed-session");
    assert_eq!(client.status().session_id.as_deref(), Some("fixed-session"));
    handle.join().unwrap();
}

#[test]
fn test_fetch_annotations_round_trip() {
    let annotations = r#"[{
        "id": "a-1",
        "sessionId": "fixed-session",
        "url": "http://localhost:4200/products",
        "target": "ProductCardComponent (body > app-root > app-product-card)",
        "intent": "Tighten spacing",
        "timestamp": 1714500000000,
        "status": "accepted"
    }]"#;
    let (url, handle) = spawn_responder(vec!["{}".to_string(), annotations.to_string()]);

    let mut client = CollectorClient::new(&url);
    client.connect(Some("fixed-session".to_string())).unwrap();
    let fetched = client.fetch_annotations().unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, "a-1");
    assert_eq!(fetched[0].session_id, "fixed-session");
    assert_eq!(fetched[0].status, AnnotationStatus::Accepted);
    handle.join().unwrap();
}

#[test]
fn test_disconnect_flips_status_but_is_recoverable() {
    // First probe succeeds, then the responder goes away, then a new one
    // appears at a different port (simulated by a fresh client).
    let (url, handle) = spawn_responder(vec!["{}".to_string()]);
    let mut client = CollectorClient::new(&url);
    assert!(client.check_status());
    handle.join().unwrap();

    // The listener is gone now; the next probe fails softly.
    assert!(!client.check_status());
    assert!(!client.status().connected);
    assert!(client.status().last_error.is_some());
}
