use axum::{extract::Query, response::Json, routing::get, Router};
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
    // Keeps the config file and SQLite db alive for the server's lifetime.
    _dir: tempfile::TempDir,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        PID.store(pid as i32, Ordering::SeqCst);
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// In-process stand-in for the statistics API. Counters grow on every poll so
/// recorded samples are monotonic, like the real platform; the id "missing"
/// always yields an empty item list.
async fn spawn_stub_api() -> String {
    let polls = Arc::new(AtomicU64::new(0));
    let app = Router::new().route(
        "/videos",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let polls = Arc::clone(&polls);
            async move {
                if params.get("id").map(String::as_str) == Some("missing") {
                    return Json(json!({ "items": [] }));
                }
                let n = polls.fetch_add(1, Ordering::SeqCst);
                Json(json!({
                    "items": [{
                        "statistics": {
                            "viewCount": (100 + 10 * n).to_string(),
                            "likeCount": (5 + n).to_string(),
                            "commentCount": (2 + n).to_string(),
                        }
                    }]
                }))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub api");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/daily")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(video_id: &str) -> TestServer {
    let api_base = spawn_stub_api().await;
    let port = pick_free_port();

    let dir = tempfile::tempdir().expect("create temp dir");
    let config_path = dir.path().join("secrets.toml");
    let db_path = dir.path().join("stats.sqlite");
    let mut config = std::fs::File::create(&config_path).expect("create config");
    write!(
        config,
        "[sqlite]\npath = {db_path:?}\n\n[youtube]\napi_key = \"test-key\"\nvideo_id = \"{video_id}\"\napi_base = \"{api_base}\"\n",
    )
    .expect("write config");

    let child = Command::new(env!("CARGO_BIN_EXE_yt_daily_stats"))
        .env("PORT", port.to_string())
        .env("APP_CONFIG_PATH", &config_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        child,
        _dir: dir,
    }
}

#[tokio::test]
async fn http_dashboard_page_renders() {
    let server = spawn_server("tracked").await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("YouTube Daily Stats"));
}

#[tokio::test]
async fn http_daily_starts_empty() {
    let server = spawn_server("tracked").await;
    let client = Client::new();

    let daily: Vec<Value> = client
        .get(format!("{}/api/daily", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(daily.is_empty());
}

#[tokio::test]
async fn http_record_persists_and_aggregates_per_day() {
    let server = spawn_server("tracked").await;
    let client = Client::new();

    let first: Value = client
        .post(format!("{}/api/record", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["views"], 100);

    let second: Value = client
        .post(format!("{}/api/record", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["views"], 110);

    // both samples land on today; the day keeps the maximum
    let daily: Vec<Value> = client
        .get(format!("{}/api/daily", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["views"], 110);
    assert_eq!(daily[0]["views_delta"], 0);
    assert_eq!(daily[0]["likes"], 6);
    assert_eq!(daily[0]["comments"], 3);
}

#[tokio::test]
async fn http_record_form_redirects_to_dashboard() {
    let server = spawn_server("tracked").await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client
        .post(format!("{}/record", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/");
}

#[tokio::test]
async fn http_missing_video_surfaces_bad_gateway_and_stores_nothing() {
    let server = spawn_server("missing").await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/record", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

    // the form flow is a logged no-op that still redirects
    let response = client
        .post(format!("{}/record", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let daily: Vec<Value> = client
        .get(format!("{}/api/daily", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(daily.is_empty());
}

#[tokio::test]
async fn http_export_csv_downloads_the_table() {
    let server = spawn_server("tracked").await;
    let client = Client::new();

    client
        .post(format!("{}/api/record", server.base_url))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    let response = client
        .get(format!("{}/export.csv", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("stats.csv"));

    let body = response.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("day,views,views_delta,likes,likes_delta,comments,comments_delta")
    );
    let row = lines.next().expect("one data row");
    assert!(row.contains(",100,0,5,0,2,0"));
}
