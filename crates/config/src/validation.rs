//! Configuration validation utilities

use crate::schema::{ConfigDocument, ConfigValue};
use types::{keys, Result};

/// SQS caps queue names at 80 characters and the stage is used verbatim
pub const MAX_STAGE_LEN: usize = 80;

/// Keys every environment document is expected to define
pub const REQUIRED_KEYS: [&str; 3] = [keys::ACCOUNT_ID, keys::AWS_REGION, keys::STAGE];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete environment document
    pub fn validate(document: &ConfigDocument) -> Result<ValidationReport> {
        let mut report = ValidationReport::new();

        // Validate presence and shape of the well-known keys
        Self::validate_required_keys(document, &mut report);

        // Validate the account identifier
        Self::validate_account(document, &mut report);

        // Validate the region name
        Self::validate_region(document, &mut report);

        // Validate the stage name
        Self::validate_stage(document, &mut report);

        Ok(report)
    }

    fn validate_required_keys(document: &ConfigDocument, report: &mut ValidationReport) {
        for key in REQUIRED_KEYS {
            match document.get(key) {
                None => report.add_error(key, "Required key is missing from the document"),
                Some(value) if value.as_str().is_none() => {
                    report.add_error(key, &format!("Expected a string, found {}", value));
                }
                Some(_) => {}
            }
        }
    }

    fn validate_account(document: &ConfigDocument, report: &mut ValidationReport) {
        let Some(account) = Self::string_value(document, keys::ACCOUNT_ID) else {
            return;
        };

        if account.len() != 12 || !account.chars().all(|c| c.is_ascii_digit()) {
            report.add_error(
                keys::ACCOUNT_ID,
                &format!("Account ID '{}' must be exactly 12 digits", account),
            );
        }
    }

    fn validate_region(document: &ConfigDocument, report: &mut ValidationReport) {
        let Some(region) = Self::string_value(document, keys::AWS_REGION) else {
            return;
        };

        if !region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            report.add_warning(
                keys::AWS_REGION,
                &format!("Region '{}' contains unexpected characters", region),
            );
            return;
        }

        // Region names look like us-east-1: at least three segments, numbered tail
        let segments: Vec<&str> = region.split('-').collect();
        let numbered_tail = segments
            .last()
            .is_some_and(|tail| !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()));
        if segments.len() < 3 || !numbered_tail {
            report.add_warning(
                keys::AWS_REGION,
                &format!("Region '{}' does not look like an AWS region name", region),
            );
        }
    }

    fn validate_stage(document: &ConfigDocument, report: &mut ValidationReport) {
        let Some(stage) = Self::string_value(document, keys::STAGE) else {
            return;
        };

        if stage.is_empty() {
            report.add_error(keys::STAGE, "Stage cannot be empty");
            return;
        }

        if stage.len() > MAX_STAGE_LEN {
            report.add_error(
                keys::STAGE,
                &format!(
                    "Stage is {} characters long, queue names allow at most {}",
                    stage.len(),
                    MAX_STAGE_LEN
                ),
            );
        }

        if !stage
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            report.add_error(
                keys::STAGE,
                &format!(
                    "Stage '{}' may only contain alphanumeric characters, hyphens, and underscores",
                    stage
                ),
            );
        }
    }

    fn string_value<'a>(document: &'a ConfigDocument, key: &str) -> Option<&'a str> {
        document.get(key).and_then(ConfigValue::as_str)
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!(
            "Validation: {} errors, {} warnings",
            self.errors.len(),
            self.warnings.len()
        )
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
