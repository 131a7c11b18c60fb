use std::net::SocketAddr;

use serde::Deserialize;
use tally_core::config::Validate;
use tally_core::error::{Result, TallyError};
use tally_core::protocol::{cors, counter};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub cors: CorsSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.storage.validate()?;
        self.cors.validate()?;

        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        ServerConfig::validate(self)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            storage: StorageSection::default(),
            cors: CorsSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Route of the counter endpoint.
    #[serde(default = "default_path")]
    pub path: String,

    /// Treat GET like POST (increment). Kept for browsers that were wired to GET.
    #[serde(default = "default_allow_get")]
    pub allow_get: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
            allow_get: default_allow_get(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(TallyError::BadRequest(
                "server.path must start with '/' and name a route".into(),
            ));
        }
        if matches!(self.path.as_str(), "/healthz" | "/readyz" | "/metrics") {
            return Err(TallyError::BadRequest(format!(
                "server.path {} collides with an ops endpoint",
                self.path
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            TallyError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_path() -> String {
    counter::DEFAULT_COUNTER_PATH.into()
}
fn default_allow_get() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Record file, only read by the `file` backend.
    #[serde(default)]
    pub path: Option<String>,

    /// Partition key of the Counter Record.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            key: default_key(),
        }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(TallyError::BadRequest("storage.key must not be empty".into()));
        }
        match (self.backend, self.path.as_deref()) {
            (StorageBackend::File, None) | (StorageBackend::File, Some("")) => Err(
                TallyError::BadRequest("storage.path is required for the file backend".into()),
            ),
            _ => Ok(()),
        }
    }
}

fn default_key() -> String {
    counter::DEFAULT_COUNTER_KEY.into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
    #[serde(default = "default_allow_headers")]
    pub allow_headers: String,
    #[serde(default = "default_allow_methods")]
    pub allow_methods: String,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            allow_origin: default_allow_origin(),
            allow_headers: default_allow_headers(),
            allow_methods: default_allow_methods(),
        }
    }
}

impl CorsSection {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("cors.allow_origin", &self.allow_origin),
            ("cors.allow_headers", &self.allow_headers),
            ("cors.allow_methods", &self.allow_methods),
        ] {
            if v.trim().is_empty() {
                return Err(TallyError::BadRequest(format!("{name} must not be empty")));
            }
            if !v.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b)) {
                return Err(TallyError::BadRequest(format!(
                    "{name} must be printable ASCII"
                )));
            }
        }
        Ok(())
    }
}

fn default_allow_origin() -> String {
    cors::DEFAULT_ALLOW_ORIGIN.into()
}
fn default_allow_headers() -> String {
    cors::DEFAULT_ALLOW_HEADERS.into()
}
fn default_allow_methods() -> String {
    cors::DEFAULT_ALLOW_METHODS.into()
}
