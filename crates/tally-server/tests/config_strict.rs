#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tally_server::config::{self, StorageBackend};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
storage:
  backend: memory
  keyy: "visitor-count" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.path, "/visitor-count");
    assert!(cfg.server.allow_get);
    assert_eq!(cfg.storage.backend, StorageBackend::Memory);
    assert_eq!(cfg.storage.key, "visitor-count");
    assert_eq!(cfg.cors.allow_origin, "*");
    assert_eq!(cfg.cors.allow_headers, "Content-Type");
    assert_eq!(cfg.cors.allow_methods, "OPTIONS,POST,GET");
}

#[test]
fn rejects_other_versions() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn file_backend_requires_path() {
    let bad = r#"
version: 1
storage:
  backend: file
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("storage.path"));

    let ok = r#"
version: 1
storage:
  backend: file
  path: "/var/lib/tally/count.json"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.storage.backend, StorageBackend::File);
}

#[test]
fn path_and_listen_are_validated() {
    let err = config::load_from_str("version: 1\nserver:\n  path: \"visitor-count\"\n")
        .expect_err("must fail");
    assert!(err.to_string().contains("server.path"));

    let err = config::load_from_str("version: 1\nserver:\n  path: \"/metrics\"\n")
        .expect_err("must fail");
    assert!(err.to_string().contains("ops endpoint"));

    let err = config::load_from_str("version: 1\nserver:\n  listen: \"localhost\"\n")
        .expect_err("must fail");
    assert!(err.to_string().contains("server.listen"));
}

#[test]
fn cors_values_must_be_header_safe() {
    let err = config::load_from_str("version: 1\ncors:\n  allow_origin: \"\"\n")
        .expect_err("must fail");
    assert!(err.to_string().contains("cors.allow_origin"));
}
