//! Configuration
//!
//! `RdfConfig` controls how projected URIs are made absolute and which
//! format is served when a client expresses no preference. Both the config
//! and mapping declarations can be loaded from YAML or JSON files.

use crate::rdf::{MappingDeclaration, RdfFormat};
use oxiri::Iri;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base IRI is not an absolute IRI
    #[error("Invalid base IRI '{iri}': {reason}")]
    InvalidBaseIri { iri: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Projection and serialization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdfConfig {
    /// Relative resource URIs are resolved against this IRI
    pub base_iri: String,
    /// Format served for wildcard or missing `Accept` headers
    pub default_format: RdfFormat,
}

impl Default for RdfConfig {
    fn default() -> Self {
        Self {
            base_iri: "http://localhost/".to_string(),
            default_format: RdfFormat::Turtle,
        }
    }
}

impl RdfConfig {
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            base_iri: base_iri.into(),
            ..Self::default()
        }
    }

    /// Check that the base IRI is absolute
    pub fn validate(&self) -> ConfigResult<()> {
        Iri::parse(self.base_iri.as_str()).map_err(|e| ConfigError::InvalidBaseIri {
            iri: self.base_iri.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let config: Self = load(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }
}

/// Load a mapping declaration from a `.yaml`/`.yml` or `.json` file
pub fn load_mapping(path: impl AsRef<Path>) -> ConfigResult<MappingDeclaration> {
    load(path.as_ref())
}

fn load<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    debug!("Loading {:?}", path);
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Ok(serde_yaml::from_str(&content)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RdfConfig::default();
        assert_eq!(config.base_iri, "http://localhost/");
        assert_eq!(config.default_format, RdfFormat::Turtle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = RdfConfig::from_yaml_str("base_iri: \"http://blog.example.org/\"\n").unwrap();
        assert_eq!(config.base_iri, "http://blog.example.org/");
        assert_eq!(config.default_format, RdfFormat::Turtle);

        let config = RdfConfig::from_yaml_str("default_format: jsonld\n").unwrap();
        assert_eq!(config.default_format, RdfFormat::JsonLd);
    }

    #[test]
    fn test_relative_base_rejected() {
        let err = RdfConfig::from_yaml_str("base_iri: \"/api/\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseIri { .. }));
    }

    #[test]
    fn test_load_mapping_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "prefixes": {{"sioc": "http://rdfs.org/sioc/ns#"}},
                "type": "sioc:Post",
                "fields": {{"body": ["sioc:content", "Literal"]}}
            }}"#
        )
        .unwrap();

        let decl = load_mapping(file.path()).unwrap();
        assert_eq!(decl.rdf_type, "sioc:Post");
        assert_eq!(decl.fields["body"].predicate, "sioc:content");
        assert!(decl.fragment.is_none());
    }

    #[test]
    fn test_config_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "base_iri: \"http://blog.example.org/\"").unwrap();
        writeln!(file, "default_format: ntriples").unwrap();

        let config = RdfConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_format, RdfFormat::NTriples);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RdfConfig::from_file("/nonexistent/rdf.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
