#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use tally_client::config::{self, RequestMethod};

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.method, RequestMethod::Post);
    let p = cfg.policy();
    assert_eq!(p.timeout, Duration::from_millis(5000));
    assert_eq!(p.max_attempts, 3);
    assert_eq!(p.delay, Duration::from_millis(1000));
}

#[test]
fn deny_unknown_fields() {
    let err = config::load_from_str("version: 1\nretries: 3\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ranges_are_checked() {
    for bad in [
        "version: 1\nmax_attempts: 0\n",
        "version: 1\nmax_attempts: 11\n",
        "version: 1\ntimeout_ms: 10\n",
        "version: 1\nretry_delay_ms: 600000\n",
        "version: 1\nendpoint: \"ftp://example.com/count\"\n",
        "version: 1\nendpoint: \"not a url\"\n",
        "version: 1\nerror_color: \"crimson\"\n",
    ] {
        assert!(config::load_from_str(bad).is_err(), "{bad}");
    }
}

#[test]
fn get_method_is_accepted() {
    let cfg = config::load_from_str("version: 1\nmethod: GET\n").unwrap();
    assert_eq!(cfg.method, RequestMethod::Get);
}

#[test]
fn error_color_reaches_display() {
    let cfg = config::load_from_str("version: 1\nerror_color: \"#00ff00\"\n").unwrap();
    assert_eq!(cfg.display().error.color, "#00ff00");
}
