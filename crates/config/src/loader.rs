//! Environment configuration resolver

use crate::schema::{ConfigDocument, ConfigValue};
use anyhow::{Context, Result};
use figment::{
    providers::{Format, Json},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use types::{keys, ConfigError, DeploymentTarget};

/// Directory searched for configuration documents when none is given
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Resolver for one environment's configuration document.
///
/// Construction derives the document path from the environment name,
/// loads it once, and fails loudly when the document is missing or
/// malformed. After construction the resolver is read-only: `get_value`
/// absorbs missing keys by logging them and returning `None`, so callers
/// decide how much absence they tolerate.
#[derive(Debug, Clone)]
pub struct EnvResolver {
    environment: String,
    document: ConfigDocument,
}

impl EnvResolver {
    /// Load the document for `environment` from the default `config/` directory
    pub fn load(environment: &str) -> Result<Self> {
        Self::load_from_dir(DEFAULT_CONFIG_DIR, environment)
    }

    /// Load the document for `environment` from `<dir>/<environment>.json`
    pub fn load_from_dir<P: AsRef<Path>>(dir: P, environment: &str) -> Result<Self> {
        let path = Self::document_path(dir.as_ref(), environment);

        // Check if the document exists before handing the path to figment
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let document: ConfigDocument = Figment::new()
            .merge(Json::file(&path))
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| {
                format!("Failed to load configuration for environment '{environment}'")
            })?;

        Ok(Self {
            environment: environment.to_string(),
            document,
        })
    }

    /// Build a resolver from a JSON string (for testing)
    pub fn from_json_str(environment: &str, document: &str) -> Result<Self> {
        let document: ConfigDocument = Figment::new()
            .merge(Json::string(document))
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse configuration from string")?;

        Ok(Self {
            environment: environment.to_string(),
            document,
        })
    }

    /// Path the document for `environment` is expected at
    pub fn document_path(dir: &Path, environment: &str) -> PathBuf {
        dir.join(format!("{environment}.json"))
    }

    /// Name of the environment this resolver was constructed for
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The full loaded document
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Look up a configuration value by key.
    ///
    /// A missing key is not an error: the condition is logged at error
    /// severity together with the full document, so the mismatch can be
    /// diagnosed from logs alone, and `None` is returned for the caller
    /// to check.
    pub fn get_value(&self, key: &str) -> Option<&ConfigValue> {
        match self.document.get(key) {
            Some(value) => Some(value),
            None => {
                error!(
                    environment = %self.environment,
                    key = %key,
                    document = %self.document,
                    "configuration key not found"
                );
                None
            }
        }
    }

    /// String view of a lookup; logs when a present value is not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        let value = self.get_value(key)?;
        let string = value.as_str();
        if string.is_none() {
            warn!(key = %key, value = %value, "configuration value is not a string");
        }
        string
    }

    /// Deployment target resolved from the well-known account/region keys
    pub fn deployment_target(&self) -> DeploymentTarget {
        DeploymentTarget::new(
            self.get_str(keys::ACCOUNT_ID).map(str::to_string),
            self.get_str(keys::AWS_REGION).map(str::to_string),
        )
    }

    /// Deployment stage used to name physical resources
    pub fn stage(&self) -> Option<&str> {
        self.get_str(keys::STAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span;
    use tracing::{Event, Level, Metadata, Subscriber};

    const NETWORKING_DEV: &str =
        r#"{"AccountId": "012345678910", "AWSRegion": "us-east-1", "Stage": "dev"}"#;

    fn write_document(dir: &Path, environment: &str, contents: &str) {
        fs::write(EnvResolver::document_path(dir, environment), contents).unwrap();
    }

    /// Captures error-severity events as `name=value` strings so tests can
    /// assert on what was logged
    struct RecordingSubscriber {
        errors: Arc<Mutex<Vec<String>>>,
    }

    impl Subscriber for RecordingSubscriber {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _attrs: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _id: &span::Id, _values: &span::Record<'_>) {}

        fn record_follows_from(&self, _id: &span::Id, _follows: &span::Id) {}

        fn event(&self, event: &Event<'_>) {
            if *event.metadata().level() != Level::ERROR {
                return;
            }
            let mut fields = String::new();
            event.record(&mut FieldCollector(&mut fields));
            self.errors.lock().unwrap().push(fields);
        }

        fn enter(&self, _id: &span::Id) {}

        fn exit(&self, _id: &span::Id) {}
    }

    struct FieldCollector<'a>(&'a mut String);

    impl Visit for FieldCollector<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            use std::fmt::Write;
            let _ = write!(self.0, "{}={:?} ", field.name(), value);
        }
    }

    #[test]
    fn test_load_reads_back_every_key() {
        let dir = tempfile::tempdir().unwrap();
        write_document(dir.path(), "networking-dev", NETWORKING_DEV);

        let resolver = EnvResolver::load_from_dir(dir.path(), "networking-dev").unwrap();
        let expected: ConfigDocument = serde_json::from_str(NETWORKING_DEV).unwrap();

        assert_eq!(resolver.environment(), "networking-dev");
        assert_eq!(resolver.document(), &expected);
        for (key, value) in expected.iter() {
            assert_eq!(resolver.get_value(key), Some(value));
        }
    }

    #[test]
    fn test_get_value_returns_stored_value() {
        let resolver = EnvResolver::from_json_str("networking-dev", NETWORKING_DEV).unwrap();
        assert_eq!(
            resolver.get_value("AccountId"),
            Some(&ConfigValue::from("012345678910"))
        );
    }

    #[test]
    fn test_missing_key_returns_none_without_failing() {
        let resolver = EnvResolver::from_json_str("networking-dev", NETWORKING_DEV).unwrap();
        assert_eq!(resolver.get_value("NotAKey"), None);
        // Lookups are read-only: asking again changes nothing
        assert_eq!(resolver.get_value("NotAKey"), None);
        assert_eq!(resolver.get_value("AccountId"), resolver.get_value("AccountId"));
    }

    #[test]
    fn test_missing_key_logs_one_error_with_the_document() {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let subscriber = RecordingSubscriber {
            errors: Arc::clone(&errors),
        };
        let resolver = EnvResolver::from_json_str("networking-dev", NETWORKING_DEV).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            // A present key logs nothing
            assert_eq!(
                resolver.get_value("AccountId"),
                Some(&ConfigValue::from("012345678910"))
            );
            assert_eq!(resolver.get_value("NotAKey"), None);
        });

        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1, "expected one error event, got {errors:?}");
        assert!(errors[0].contains("configuration key not found"));
        assert!(errors[0].contains("NotAKey"));
        // The full document rides along so the mismatch is diagnosable from logs
        assert!(errors[0]
            .contains(r#"{"AccountId":"012345678910","AWSRegion":"us-east-1","Stage":"dev"}"#));
    }

    #[test]
    fn test_missing_document_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EnvResolver::load_from_dir(dir.path(), "networking-qa").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_document_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        write_document(dir.path(), "networking-dev", "{ not json");

        let err = EnvResolver::load_from_dir(dir.path(), "networking-dev").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_scalar_types_survive_loading() {
        let resolver = EnvResolver::from_json_str(
            "networking-dev",
            r#"{"MaxReceiveCount": 5, "Encrypted": true, "Ratio": 1.5, "RetentionBytes": 9223372036854775808, "Stage": "dev"}"#,
        )
        .unwrap();

        assert_eq!(resolver.get_value("MaxReceiveCount"), Some(&ConfigValue::Integer(5)));
        assert_eq!(resolver.get_value("Encrypted"), Some(&ConfigValue::Bool(true)));
        assert_eq!(resolver.get_value("Ratio"), Some(&ConfigValue::Float(1.5)));
        assert_eq!(
            resolver.get_value("RetentionBytes"),
            Some(&ConfigValue::Uint(9223372036854775808))
        );
    }

    #[test]
    fn test_get_str_is_none_for_non_strings() {
        let resolver =
            EnvResolver::from_json_str("networking-dev", r#"{"MaxReceiveCount": 5}"#).unwrap();
        assert_eq!(resolver.get_str("MaxReceiveCount"), None);
    }

    #[test]
    fn test_typed_views_over_well_known_keys() {
        let resolver = EnvResolver::from_json_str("networking-dev", NETWORKING_DEV).unwrap();

        let target = resolver.deployment_target();
        assert_eq!(target.account.as_deref(), Some("012345678910"));
        assert_eq!(target.region.as_deref(), Some("us-east-1"));
        assert_eq!(resolver.stage(), Some("dev"));
    }

    #[test]
    fn test_typed_views_tolerate_absence() {
        let resolver = EnvResolver::from_json_str("networking-dev", "{}").unwrap();
        assert!(resolver.document().is_empty());
        assert!(resolver.deployment_target().is_unresolved());
        assert_eq!(resolver.stage(), None);
    }
}
