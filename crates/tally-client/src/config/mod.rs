//! Client config loader (strict parsing).

pub mod schema;

use tally_core::config::{load_yaml_file, load_yaml_str};
use tally_core::error::Result;

pub use schema::{ClientConfig, RequestMethod};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    load_yaml_file(path)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    load_yaml_str(s)
}
