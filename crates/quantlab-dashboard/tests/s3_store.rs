//! S3 store against a local fake endpoint (path-style addressing).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Credentials;
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

use quantlab_core::FailureKind;
use quantlab_dashboard::config::{StoreConfig, StoreKind};
use quantlab_dashboard::store::{ObjectStore, S3Store};

const NO_SUCH_KEY: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message></Error>";
const ACCESS_DENIED: &str = "<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>";

async fn spawn_fake_s3() -> SocketAddr {
    let app = Router::new()
        .route("/quantlab-bucket/breadth_data.json", get(|| async { r#"{"timestamp":"t","data":{}}"# }))
        .route(
            "/quantlab-bucket/missing.json",
            get(|| async { (StatusCode::NOT_FOUND, NO_SUCH_KEY) }),
        )
        .route(
            "/quantlab-bucket/private.json",
            get(|| async { (StatusCode::FORBIDDEN, ACCESS_DENIED) }),
        )
        .route(
            "/quantlab-bucket/broken.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
        )
        .route(
            "/quantlab-bucket/slow.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "late"
            }),
        )
        .route("/quantlab-bucket/signed.json", get(echo_auth));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// 200 with the `authorization` header when signed, 403 otherwise.
async fn echo_auth(headers: HeaderMap) -> impl IntoResponse {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(a) if headers.contains_key("x-amz-date") => (StatusCode::OK, a.to_string()),
        _ => (StatusCode::FORBIDDEN, ACCESS_DENIED.to_string()),
    }
}

fn store_cfg(addr: SocketAddr, timeout_ms: u64) -> StoreConfig {
    StoreConfig {
        kind: StoreKind::S3,
        bucket: "quantlab-bucket".into(),
        region: "eu-west-2".into(),
        endpoint: Some(format!("http://{addr}/")),
        root: None,
        timeout_ms,
    }
}

fn static_store(cfg: &StoreConfig) -> S3Store {
    let builder = aws_sdk_s3::config::Builder::new()
        .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "static"));
    S3Store::with_config(cfg, builder)
}

#[test]
fn describe_names_bucket_and_location() {
    let s = static_store(&StoreConfig::default());
    assert_eq!(s.describe(), "s3://quantlab-bucket in eu-west-2");
    assert_eq!(s.bucket(), "quantlab-bucket");

    let cfg = StoreConfig {
        endpoint: Some("http://127.0.0.1:9000/".into()),
        ..StoreConfig::default()
    };
    assert_eq!(static_store(&cfg).describe(), "s3://quantlab-bucket via http://127.0.0.1:9000");
}

#[tokio::test]
async fn reads_object_body() {
    let addr = spawn_fake_s3().await;
    let s = static_store(&store_cfg(addr, 1000));
    let body = s.get_object("breadth_data.json").await.unwrap();
    assert_eq!(&body[..], br#"{"timestamp":"t","data":{}}"#);
}

#[tokio::test]
async fn status_codes_map_to_failure_kinds() {
    let addr = spawn_fake_s3().await;
    let s = static_store(&store_cfg(addr, 1000));

    let err = s.get_object("missing.json").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
    assert!(err.to_string().contains("NoSuchKey"), "{err}");

    let err = s.get_object("private.json").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::AccessDenied);
    assert!(err.to_string().contains("AccessDenied"), "{err}");

    let err = s.get_object("broken.json").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Unreachable);
}

#[tokio::test]
async fn slow_store_times_out() {
    let addr = spawn_fake_s3().await;
    let s = static_store(&store_cfg(addr, 100));
    let err = s.get_object("slow.json").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_endpoint() {
    // bind then drop to get a port nobody listens on
    let addr = {
        let l = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let s = static_store(&store_cfg(addr, 1000));
    let err = s.get_object("breadth_data.json").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Unreachable);
}

#[tokio::test]
async fn shared_credentials_file_signs_requests() {
    let addr = spawn_fake_s3().await;

    let dir = tempfile::tempdir().unwrap();
    let creds_path = dir.path().join("credentials");
    std::fs::write(
        &creds_path,
        "[default]\naws_access_key_id = AKIDPROFILE\naws_secret_access_key = secret\n",
    )
    .unwrap();
    let files = ProfileFiles::builder()
        .with_file(ProfileFileKind::Credentials, &creds_path)
        .build();

    let loader = aws_config::defaults(BehaviorVersion::latest()).profile_files(files);
    let s = S3Store::from_loader(&store_cfg(addr, 1000), loader).await;

    let body = s.get_object("signed.json").await.unwrap();
    let auth = String::from_utf8(body.to_vec()).unwrap();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDPROFILE/"), "{auth}");
    assert!(auth.contains("/eu-west-2/s3/aws4_request"), "{auth}");
}
