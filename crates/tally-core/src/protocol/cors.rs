//! Cross-origin header names and their default values.

pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
pub const ALLOW_METHODS: &str = "access-control-allow-methods";

pub const DEFAULT_ALLOW_ORIGIN: &str = "*";
pub const DEFAULT_ALLOW_HEADERS: &str = "Content-Type";
pub const DEFAULT_ALLOW_METHODS: &str = "OPTIONS,POST,GET";
