//! Dispatch behavior against a scripted HTTP master: reactive
//! re-authentication on 401, error classification, transport failures.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use fleet_gateway::{Call, DispatchError, GatewayClient, Target};

/// One observed request: path plus the bearer token it carried.
struct Observed {
    path: String,
    auth_token: String,
}

/// Serves the scripted responses in order, one connection per request,
/// recording what each request carried. The listener closes once the
/// script is exhausted.
struct MasterStub {
    addr: SocketAddr,
    observed: Arc<Mutex<Vec<Observed>>>,
}

impl MasterStub {
    async fn serve(script: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let observed = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&observed);

        tokio::spawn(async move {
            for (status, body) in script {
                let (mut stream, _) = listener.accept().await.unwrap();
                let request = read_request(&mut stream).await;
                log.lock().unwrap().push(request);

                let reason = match status {
                    200 => "OK",
                    400 => "Bad Request",
                    401 => "Unauthorized",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            }
        });

        Self { addr, observed }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn login_count(&self) -> usize {
        self.observed
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == "/login")
            .count()
    }

    fn last_token(&self) -> String {
        self.observed
            .lock()
            .unwrap()
            .last()
            .map(|r| r.auth_token.clone())
            .unwrap_or_default()
    }

    fn request_count(&self) -> usize {
        self.observed.lock().unwrap().len()
    }
}

async fn read_request(stream: &mut TcpStream) -> Observed {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed mid-request");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let body_len = header_value(&head, "content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + 4 + body_len {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed mid-body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();
    Observed {
        path,
        auth_token: header_value(&head, "x-auth-token").unwrap_or_default(),
    }
}

fn header_value(head: &str, name: &str) -> Option<String> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name)
            .then(|| value.trim().to_string())
    })
}

fn login_body(token: &str) -> String {
    json!({"return": [{"token": token}]}).to_string()
}

#[tokio::test]
async fn first_401_reauthenticates_once_and_retries() {
    let stub = MasterStub::serve(vec![
        (200, login_body("tok-initial")),
        (401, String::new()),
        (200, login_body("tok-refreshed")),
        (200, json!({"return": [{"node-1": true}]}).to_string()),
    ])
    .await;

    let mut client = GatewayClient::new(&stub.base_url(), "op", "secret");
    let target = Target::resolve("node-1").unwrap();
    let response = client.run(&Call::new(&target, "test.ping")).await.unwrap();

    assert_eq!(response.minion_count(), 1);
    assert_eq!(response.online_count(), 1);
    // Lazy login, rejected dispatch, re-login, retried dispatch.
    assert_eq!(stub.request_count(), 4);
    assert_eq!(stub.login_count(), 2);
    // The retried dispatch carries the refreshed token.
    assert_eq!(stub.last_token(), "tok-refreshed");
}

#[tokio::test]
async fn second_consecutive_401_is_fatal() {
    let stub = MasterStub::serve(vec![
        (200, login_body("tok-1")),
        (401, String::new()),
        (200, login_body("tok-2")),
        (401, String::new()),
    ])
    .await;

    let mut client = GatewayClient::new(&stub.base_url(), "op", "secret");
    let err = client
        .run(&Call::new(&Target::all(), "test.ping"))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Auth(_)));
    // Exactly one re-authentication, never a second retry.
    assert_eq!(stub.login_count(), 2);
    assert_eq!(stub.request_count(), 4);
}

#[tokio::test]
async fn bad_request_maps_to_bad_target() {
    let stub = MasterStub::serve(vec![
        (200, login_body("tok-1")),
        (400, json!({"error": "unrecognized tgt_type"}).to_string()),
    ])
    .await;

    let mut client = GatewayClient::new(&stub.base_url(), "op", "secret");
    let err = client
        .run(&Call::new(&Target::all(), "test.ping"))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::BadTarget(_)));
    assert!(err.to_string().contains("unrecognized tgt_type"));
}

#[tokio::test]
async fn other_failure_status_maps_to_remote_failure() {
    let stub = MasterStub::serve(vec![
        (200, login_body("tok-1")),
        (500, json!({"error": "module crashed"}).to_string()),
    ])
    .await;

    let mut client = GatewayClient::new(&stub.base_url(), "op", "secret");
    let err = client
        .run(&Call::new(&Target::all(), "test.ping"))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::RemoteFailure(_)));
}

#[tokio::test]
async fn transport_failure_maps_to_unreachable() {
    // The script ends after the login, so the listener is gone by the
    // time the dispatch itself goes out.
    let stub = MasterStub::serve(vec![(200, login_body("tok-1"))]).await;

    let mut client = GatewayClient::new(&stub.base_url(), "op", "secret");
    client.authenticate().await.unwrap();

    let err = client
        .run(&Call::new(&Target::all(), "test.ping"))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Unreachable(_)));
}
