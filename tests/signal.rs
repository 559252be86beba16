// End-to-end: the demo binary serves, then exits cleanly on SIGTERM.
#![cfg(unix)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

const LISTENING_PREFIX: &str = "httpdrone listening on: http://";

fn spawn_demo() -> (Child, SocketAddr) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_httpdrone"))
        .arg("/nonexistent/httpdrone-signal-test")
        .env("PORT", "0")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start demo binary");

    let stdout = child.stdout.take().unwrap();
    let mut lines = BufReader::new(stdout).lines();
    let addr = loop {
        let line = lines
            .next()
            .expect("demo exited before listening")
            .unwrap();
        if let Some(addr) = line.strip_prefix(LISTENING_PREFIX) {
            break addr.trim().parse().unwrap();
        }
    };

    // Keep draining stdout so access log lines never block the server
    std::thread::spawn(move || for _ in lines {});

    (child, addr)
}

fn get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    write!(stream, "GET {path} HTTP/1.1\r\nHost: test\r\n\r\n").unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::process::ExitStatus {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("demo did not exit within {timeout:?}");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn test_sigterm_stops_idle_server() {
    let (mut child, addr) = spawn_demo();

    let response = get(addr, "/example");
    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.ends_with("<html><body>Here you go!</body></html>"));

    let response = get(addr, "/elsewhere");
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    write!(stream, "POST /example HTTP/1.1\r\nHost: test\r\nContent-Length: 0\r\n\r\n").unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert!(response.starts_with("HTTP/1.1 405"), "{response}");

    let pid = child.id().to_string();
    let killed = Command::new("kill")
        .args(["-TERM", pid.as_str()])
        .status()
        .expect("failed to run kill");
    assert!(killed.success());

    let status = wait_with_timeout(&mut child, Duration::from_secs(5));
    assert!(status.success(), "exit status: {status:?}");
}
