use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Command, Output};
use std::thread;

use bytes::BytesMut;
use common::{InfoCodec, InfoReply};
use tokio_util::codec::Encoder;

fn info(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_info"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// A node that serves one connection, answering from `answers`.
fn spawn_node(answers: &'static [(&'static str, &'static str)]) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        if let Ok((socket, _)) = listener.accept() {
            serve(socket, answers);
        }
    });
    port
}

fn serve(mut socket: TcpStream, answers: &[(&str, &str)]) {
    let mut header = [0u8; 8];
    while socket.read_exact(&mut header).is_ok() {
        let len = header[2..]
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | *b as usize);
        let mut body = vec![0u8; len];
        if socket.read_exact(&mut body).is_err() {
            return;
        }
        let body = String::from_utf8(body).unwrap();
        let reply: InfoReply = body
            .lines()
            .filter_map(|cmd| {
                answers
                    .iter()
                    .find(|(name, _)| *name == cmd)
                    .map(|(name, value)| (name.to_string(), value.to_string()))
            })
            .collect();

        let mut buf = BytesMut::new();
        InfoCodec.encode(reply, &mut buf).unwrap();
        if socket.write_all(&buf).is_err() {
            return;
        }
    }
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn help_exits_with_1() {
    let output = info(&["--help"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--host <ADDRESS>"));
    assert!(stdout.contains("--port <PORT>"));
}

#[test]
fn connect_failure_exits_with_3() {
    let port = closed_port().to_string();
    let output = info(&["-h", "127.0.0.1", "-p", &port]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("error: failed to connect to 127.0.0.1:"));
}

#[test]
fn prints_default_statistics_request() {
    let port = spawn_node(&[
        ("node", "BB9000000000001"),
        ("statistics", "cluster_size=1;objects=42"),
    ])
    .to_string();
    let output = info(&["-p", &port]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "BB9000000000001:\n    - cluster_size: 1\n    - objects: 42\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn positional_arguments_form_the_request() {
    let port = spawn_node(&[("node", "BB9000000000001"), ("namespace test", "objects=7")])
        .to_string();
    let output = info(&["--port", &port, "namespace", "test"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "BB9000000000001: objects=7\n"
    );
}

#[test]
fn malformed_reply_exits_with_2() {
    let port = spawn_node(&[("node", "BB9000000000001"), ("sets", "ns=test;bogus")])
        .to_string();
    let output = info(&["-p", &port, "sets"]);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "BB9000000000001:\n    - ns: test\n"
    );
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("error: malformed field"));
}
