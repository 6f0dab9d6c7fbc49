//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses by path, answers HEAD with headers only, and records
//! every request it receives so tests can assert on what was sent.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Canned response for one path.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    pub location: Option<String>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            location: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            location: None,
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            body: Vec::new(),
            location: Some(location.into()),
        }
    }
}

/// One request as received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<String>,
}

impl Recorded {
    /// Value of header `name` (case-insensitive), if sent.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.iter().find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim()
                .eq_ignore_ascii_case(name)
                .then(|| v.trim().to_string())
        })
    }
}

pub type RequestLog = Arc<Mutex<Vec<Recorded>>>;

/// A bound but not yet serving listener, so routes can embed the address.
pub struct TestServer {
    listener: TcpListener,
    routes: HashMap<String, Route>,
}

impl TestServer {
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        Self {
            listener,
            routes: HashMap::new(),
        }
    }

    /// `127.0.0.1:<port>`
    pub fn host(&self) -> String {
        let port = self.listener.local_addr().unwrap().port();
        format!("127.0.0.1:{}", port)
    }

    /// `http://127.0.0.1:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.host())
    }

    pub fn route(mut self, path: &str, route: Route) -> Self {
        self.routes.insert(path.to_string(), route);
        self
    }

    /// Starts serving in a background thread until the process exits.
    /// Unknown paths get 404.
    pub fn start(self) -> RequestLog {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(self.routes);
        let listener = self.listener;
        let log_srv = Arc::clone(&log);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log_srv);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });
        log
    }
}

fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if data.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8(data).ok()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, log: &RequestLog) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };

    let mut lines = request.split("\r\n");
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let target = first.next().unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/").to_string();
    let headers: Vec<String> = lines
        .take_while(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        headers,
    });

    let route = routes.get(&path).cloned().unwrap_or(Route {
        status: 404,
        body: b"Not Found".to_vec(),
        location: None,
    });

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    if let Some(location) = &route.location {
        head.push_str(&format!("Location: {}\r\n", location));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(&route.body);
    }
    let _ = stream.flush();
}
