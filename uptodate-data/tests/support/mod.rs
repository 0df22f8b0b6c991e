//! Shared helpers for the data integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

/// Directory holding the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Single-request HTTP server answering with a canned response.
pub struct CannedServer {
    /// Base URL to configure the client with.
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    /// Serve one request with the given status line and body.
    pub fn serve_once(status_line: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let address = listener.local_addr().expect("listener address");
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request line");
            loop {
                let mut header = String::new();
                let read = reader.read_line(&mut header).expect("read header");
                if read == 0 || header == "\r\n" {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).expect("write response");
            request_line
        });
        Self {
            base_url: format!("http://{address}"),
            handle,
        }
    }

    /// Wait for the request and return its request line.
    pub fn request_line(self) -> String {
        self.handle.join().expect("server thread")
    }
}
