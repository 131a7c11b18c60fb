//! Strict YAML loading shared by the server and client configs.

use std::fs;

use serde::de::DeserializeOwned;

use crate::error::{Result, TallyError};

/// A config document that checks its own ranges after parsing.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn load_yaml_file<T: DeserializeOwned + Validate>(path: &str) -> Result<T> {
    let s = fs::read_to_string(path)
        .map_err(|e| TallyError::Internal(format!("read config {path} failed: {e}")))?;
    load_yaml_str(&s)
}

pub fn load_yaml_str<T: DeserializeOwned + Validate>(s: &str) -> Result<T> {
    let cfg: T = serde_yaml::from_str(s)
        .map_err(|e| TallyError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Doc {
        limit: u32,
    }

    impl Validate for Doc {
        fn validate(&self) -> Result<()> {
            if self.limit == 0 {
                return Err(TallyError::BadRequest("limit must be positive".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn parse_then_validate() {
        let doc: Doc = load_yaml_str("limit: 3\n").unwrap();
        assert_eq!(doc.limit, 3);

        let err = load_yaml_str::<Doc>("limit: 0\n").unwrap_err();
        assert!(err.to_string().contains("limit must be positive"));

        let err = load_yaml_str::<Doc>("limitt: 3\n").unwrap_err();
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    }

    #[test]
    fn missing_file_is_internal() {
        let err = load_yaml_file::<Doc>("/nonexistent/tally.yaml").unwrap_err();
        assert_eq!(err.client_code().as_str(), "INTERNAL");
    }
}
