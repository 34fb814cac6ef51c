use layoutdeck::config::MasterServerConfig;
use layoutdeck::gateway::{BackendGateway, UreqTransport};
use layoutdeck::pages::Page;
use layoutdeck::router::{LoadFilePayload, PageData, WorkflowRouter};
use layoutdeck::session::{ArtifactKind, IntentTracker, ServerInfo, SessionStore};
use layoutdeck::shared::PageLoadError;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    content_type: String,
    body: String,
}

struct MockBackend {
    port: u16,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockBackend {
    fn start<F>(expected_requests: usize, responder: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_for_thread = Arc::clone(&requests);
        let responder = Arc::new(responder);

        let handle = thread::spawn(move || {
            for _ in 0..expected_requests {
                let (mut stream, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

                let mut request_line = String::new();
                reader
                    .read_line(&mut request_line)
                    .expect("read request line");
                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let path = parts.next().unwrap_or("/").to_string();

                let mut content_type = String::new();
                let mut content_length = 0usize;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).expect("read header");
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    let lower = line.to_ascii_lowercase();
                    if lower.starts_with("content-type:") {
                        content_type = line
                            .split_once(':')
                            .map(|(_, v)| v.trim().to_string())
                            .unwrap_or_default();
                    }
                    if lower.starts_with("content-length:") {
                        content_length = line
                            .split_once(':')
                            .map(|(_, v)| v.trim().parse::<usize>().unwrap_or(0))
                            .unwrap_or(0);
                    }
                }

                let mut body = vec![0_u8; content_length];
                if content_length > 0 {
                    reader.read_exact(&mut body).expect("read body");
                }
                let body = String::from_utf8_lossy(&body).to_string();

                requests_for_thread
                    .lock()
                    .expect("lock requests")
                    .push(RecordedRequest {
                        method,
                        path: path.clone(),
                        content_type,
                        body,
                    });

                let (status, response_body) = responder(&path);
                let reason = if status < 400 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response_body.len(),
                    response_body
                );
                stream
                    .write_all(response.as_bytes())
                    .expect("write response");
            }
        });

        Self {
            port: addr.port(),
            requests,
            handle: Some(handle),
        }
    }

    fn server(&self) -> ServerInfo {
        ServerInfo::new("127.0.0.1", self.port)
    }

    fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock backend");
        }
        self.requests.lock().expect("lock requests").clone()
    }
}

fn gateway() -> BackendGateway {
    BackendGateway::new(UreqTransport::new(Some(Duration::from_secs(5))))
}

#[test]
fn post_json_sends_json_body_to_endpoint_path() {
    let backend = MockBackend::start(1, |_path| (200, r#"{"materials":[]}"#.to_string()));
    let server = backend.server();

    let value = gateway()
        .post_json(
            &server,
            "/load-material-data",
            &LoadFilePayload {
                filename: "materials.cmx".to_string(),
            },
        )
        .expect("post json");

    let requests = backend.finish();
    assert_eq!(value, serde_json::json!({"materials": []}));
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/load-material-data");
    assert_eq!(requests[0].content_type, "application/json");
    assert_eq!(requests[0].body, r#"{"filename":"materials.cmx"}"#);
}

#[test]
fn error_status_is_reported_with_backend_detail() {
    let backend = MockBackend::start(1, |_path| {
        (500, r#"{"detail":"stackup.csv not found"}"#.to_string())
    });
    let server = backend.server();

    let err = gateway()
        .post_json(
            &server,
            "/load-stackup",
            &serde_json::json!({"fname": "stackup.csv"}),
        )
        .expect_err("500 must fail");
    backend.finish();

    match err {
        PageLoadError::Backend {
            url,
            status,
            detail,
        } => {
            assert_eq!(url, format!("{}/load-stackup", server.base_url()));
            assert_eq!(status, 500);
            assert_eq!(detail, "stackup.csv not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_json_success_body_is_malformed() {
    let backend = MockBackend::start(1, |_path| (200, "<html>ok</html>".to_string()));
    let server = backend.server();

    let err = gateway()
        .post_json(&server, "/get-port-info", &serde_json::json!({}))
        .expect_err("html body must fail");
    backend.finish();

    assert_eq!(err.kind(), "malformed_response");
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let err = gateway()
        .post_json(
            &ServerInfo::new("127.0.0.1", port),
            "/get-sink-info",
            &serde_json::json!({}),
        )
        .expect_err("closed port must fail");

    match err {
        PageLoadError::Transport { url, .. } => {
            assert_eq!(url, format!("http://127.0.0.1:{port}/get-sink-info"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_round_trip_against_live_backend() {
    let backend = MockBackend::start(2, |path| match path {
        "/load-stackup" => (200, r#"{"layers":[{"name":"TOP"}]}"#.to_string()),
        _ => (200, r#"{"layers":[]}"#.to_string()),
    });
    let session = SessionStore::new();
    session.set_server(backend.server());
    session.set_active_layout("board1.brd");
    session.set_file_ref(ArtifactKind::Stackup, "stackup.csv");
    let intents = IntentTracker::new();
    intents.set_intent(
        layoutdeck::session::LoadFileType::Stackup,
        Page::CreateStackup.route(),
    );
    let router = WorkflowRouter::new(gateway(), session, intents);

    let fresh = router.visit(Page::CreateStackup).expect("fresh load");
    let refresh = router.visit(Page::CreateStackup).expect("refresh");
    let requests = backend.finish();

    assert!(matches!(fresh, PageData::Stackup(ref data) if data.fresh_load));
    assert_eq!(fresh.body()["layers"][0]["name"], "TOP");
    assert!(matches!(refresh, PageData::Stackup(ref data) if !data.fresh_load));
    assert_eq!(requests[0].path, "/load-stackup");
    assert_eq!(requests[0].body, r#"{"fname":"stackup.csv"}"#);
    assert_eq!(requests[1].path, "/get-stackup");
    assert_eq!(
        requests[1].body,
        r#"{"session_id":"","layout_fname":"board1.brd"}"#
    );
}

#[test]
fn discovery_uses_get_against_master_server() {
    let backend = MockBackend::start(1, |_path| {
        (
            200,
            r#"{"version":"3.0","servers":[{"ip_address":"10.0.0.7","port":8001}]}"#.to_string(),
        )
    });
    let router = WorkflowRouter::new(gateway(), SessionStore::new(), IntentTracker::new())
        .with_master_server(MasterServerConfig {
            address: "127.0.0.1".to_string(),
            port: backend.port,
        });

    let info = router.discover_servers().expect("discover");
    let requests = backend.finish();

    assert_eq!(requests[0].method, "GET");
    assert_eq!(info.version.as_deref(), Some("3.0"));
    assert_eq!(info.servers, vec![ServerInfo::new("10.0.0.7", 8001)]);
}
