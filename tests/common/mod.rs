//! Shared integration test helpers for diagram-export.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{fake_png, serve_once};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per file.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use diagram_export::config::DiagramEntry;

/// Bytes that start with a PNG signature, tagged with `tag` so different
/// entries produce different files.
pub fn fake_png(tag: &str) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

/// Synthetic entries named after `names`.
pub fn entries(names: &[&str]) -> Vec<DiagramEntry> {
    names
        .iter()
        .map(|name| {
            DiagramEntry::new(*name, format!("\n  sequenceDiagram\n    A->>B: {name}\n"))
        })
        .collect()
}

/// Serve exactly one HTTP/1.1 response on a loopback port.
///
/// Returns the base URL and a handle yielding the raw request head
/// (request line and headers) the server received.
pub fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind loopback listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("Failed to accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("Failed to clone stream"));

        let mut head = String::new();
        loop {
            let mut line = String::new();
            let read = reader.read_line(&mut line).expect("Failed to read request");
            if read == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .expect("Failed to write response head");
        stream.write_all(&body).expect("Failed to write response body");
        stream.flush().expect("Failed to flush response");
        head
    });

    (format!("http://{addr}"), handle)
}
