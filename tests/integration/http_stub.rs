//! Minimal canned-response HTTP server for network-path tests.
//!
//! Binds an OS-assigned local port and answers each request from a fixed
//! path-to-response table; unknown paths get a 404. Every response carries
//! `Connection: close`, so requests arrive one connection at a time and the
//! single-threaded accept loop suffices.

use std::io::{Read, Write};
use std::net::TcpListener;

/// One canned route: request path, status code, body.
pub type Route = (&'static str, u16, Vec<u8>);

/// Start serving `routes` on a local port; returns the base URL
/// (`http://127.0.0.1:<port>`). The accept loop runs for the life of the
/// test process.
pub fn start_stub(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local stub port");
    let addr = listener.local_addr().expect("stub has a local addr");

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let path = request.split_whitespace().nth(1).unwrap_or("/");

            let (status, body) = routes
                .iter()
                .find(|(p, _, _)| *p == path)
                .map(|(_, s, b)| (*s, b.as_slice()))
                .unwrap_or((404, &[][..]));
            let reason = if status == 200 { "OK" } else { "Not Found" };

            let header = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
    });

    format!("http://{addr}")
}
