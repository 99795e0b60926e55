//! End-to-end CLI tests against a scripted fake peer.

#![cfg(unix)]

use std::io::{Read, Write};
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::process::Command;

use bytes::BytesMut;
use pineipc_proto::{decode_request, encode_reply, Status};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "pineipc-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

/// Accept one connection, answer every request with a fixed payload.
fn serve_fixed(listener: UnixListener, payload: Vec<u8>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("peer should accept");
        let mut buf = BytesMut::new();
        loop {
            match decode_request(&mut buf) {
                Ok(Some(_)) => {
                    let mut reply = BytesMut::new();
                    encode_reply(Status::Ok, &payload, &mut reply);
                    if stream.write_all(&reply).is_err() {
                        return;
                    }
                }
                Ok(None) => {
                    let mut chunk = [0u8; 256];
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                Err(_) => return,
            }
        }
    })
}

#[test]
fn read_prints_json_value() {
    let dir = unique_temp_dir("read");
    let sock_path = dir.join("pine.sock");
    let listener = UnixListener::bind(&sock_path).unwrap();
    let server = serve_fixed(listener, 0xDEAD_BEEFu32.to_le_bytes().to_vec());

    let output = Command::new(env!("CARGO_BIN_EXE_pineipc"))
        .args([
            "read",
            "0x1000",
            "--width",
            "4",
            "--socket",
            sock_path.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("binary should run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["command"], "READ32");
    assert_eq!(json["value"], "0xdeadbeef");
    assert_eq!(json["decimal"], "3735928559");

    server.join().unwrap();
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_reports_ok() {
    let dir = unique_temp_dir("write");
    let sock_path = dir.join("pine.sock");
    let listener = UnixListener::bind(&sock_path).unwrap();
    let server = serve_fixed(listener, Vec::new());

    let output = Command::new(env!("CARGO_BIN_EXE_pineipc"))
        .args([
            "write",
            "0x1000",
            "0xBEEF",
            "--width",
            "2",
            "--socket",
            sock_path.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("binary should run");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(String::from_utf8(output.stdout).unwrap().trim()).unwrap();
    assert_eq!(json["command"], "WRITE16");
    assert_eq!(json["result"], "ok");

    server.join().unwrap();
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_width_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_pineipc"))
        .args(["read", "0x1000", "--width", "3"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid data size"));
}

#[test]
fn invalid_slot_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_pineipc"))
        .args(["status", "--slot", "65537"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn unreachable_peer_exits_with_transport_code() {
    let dir = unique_temp_dir("unreachable");
    let sock_path = dir.join("absent.sock");

    let output = Command::new(env!("CARGO_BIN_EXE_pineipc"))
        .args([
            "status",
            "--socket",
            sock_path.to_str().unwrap(),
            "--timeout",
            "100ms",
        ])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(3));
    let _ = std::fs::remove_dir_all(&dir);
}
