//! Application assembly and synthesis lifecycle

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use config::{ConfigDocument, ConfigValidator, ConfigValue, EnvResolver, ValidationReport};
use constructs::{Queue, QueueProps, Stack, StackProps, Topic, TopicProps};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use types::keys;

/// Seconds a received message stays hidden before redelivery
const QUEUE_VISIBILITY_TIMEOUT_SECONDS: u64 = 300;

/// Application wiring the configuration resolver to stack declarations
#[derive(Debug)]
pub struct Application {
    environment: String,
    resolver: EnvResolver,
}

impl Application {
    /// Load the configuration for `environment` and prepare for synthesis
    pub fn new<P: AsRef<Path>>(config_dir: P, environment: &str) -> Result<Self> {
        let resolver = EnvResolver::load_from_dir(config_dir, environment)?;
        let document = resolver.document();
        info!(
            environment = %environment,
            entries = document.len(),
            keys = %document.keys().collect::<Vec<_>>().join(", "),
            "configuration loaded"
        );

        Ok(Self {
            environment: environment.to_string(),
            resolver,
        })
    }

    /// Run the advisory checks over the loaded document
    pub fn validate(&self) -> Result<ValidationReport> {
        Ok(ConfigValidator::validate(self.resolver.document())?)
    }

    /// Declare every stack the application synthesizes.
    ///
    /// One messaging stack: a queue subscribed to a topic, both physically
    /// named after the configured stage. A missing stage leaves the names
    /// to CloudFormation rather than failing the build.
    pub fn build_stacks(&self) -> Result<Vec<Stack>> {
        let target = self.resolver.deployment_target();
        if target.is_unresolved() {
            warn!(
                environment = %self.environment,
                "no account or region configured, stacks will be environment-agnostic"
            );
        }

        let stage = self.resolver.stage().map(str::to_string);

        let mut stack = Stack::new(
            "MessagingStack",
            StackProps {
                stack_name: Some(format!("{}-messaging-stack", self.environment)),
                description: Some(format!(
                    "Messaging resources for the {} environment",
                    self.environment
                )),
                target,
            },
        )?;

        let queue = Queue::new(
            &mut stack,
            "MessagingQueue",
            QueueProps {
                queue_name: stage.clone(),
                visibility_timeout_seconds: Some(QUEUE_VISIBILITY_TIMEOUT_SECONDS),
            },
        )?;

        let topic = Topic::new(&mut stack, "MessagingTopic", TopicProps { topic_name: stage })?;

        topic.add_sqs_subscription(&mut stack, &queue)?;

        info!(
            stack = %stack.stack_name(),
            resources = stack.resource_count(),
            "stack declared"
        );

        Ok(vec![stack])
    }

    /// Synthesize all stacks and write the artifacts into `out_dir`
    pub fn synth<P: AsRef<Path>>(&self, out_dir: P) -> Result<SynthArtifacts> {
        let out_dir = out_dir.as_ref();

        // Findings are advisory here: log them and keep synthesizing
        let report = self.validate()?;
        for issue in &report.errors {
            warn!(field = %issue.field, "validation error: {}", issue.message);
        }
        for issue in &report.warnings {
            warn!(field = %issue.field, "validation warning: {}", issue.message);
        }

        let stacks = self.build_stacks()?;

        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

        let mut templates = Vec::new();
        let mut manifest_stacks = Vec::new();
        for stack in &stacks {
            let file_name = format!("{}.template.json", stack.stack_name());
            let path = out_dir.join(&file_name);
            let rendered = stack.to_template().to_json_pretty()?;
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write template {}", path.display()))?;
            info!(template = %path.display(), "template written");

            let target = stack.target();
            manifest_stacks.push(ManifestStack {
                name: stack.stack_name().to_string(),
                template_file: file_name,
                account: target.account.clone(),
                region: target.region.clone(),
            });
            templates.push(path);
        }

        // The manifest mirrors the document, so read the stage without
        // going through the logging lookup path a second time
        let stage = self
            .resolver
            .document()
            .get(keys::STAGE)
            .and_then(ConfigValue::as_str)
            .map(str::to_string);

        let manifest = Manifest {
            environment: self.environment.clone(),
            stage,
            synthesized_at: Utc::now(),
            stacks: manifest_stacks,
        };
        let manifest_path = out_dir.join("manifest.json");
        let rendered = serde_json::to_string_pretty(&manifest)
            .context("Failed to render synthesis manifest")?;
        fs::write(&manifest_path, rendered)
            .with_context(|| format!("Failed to write manifest {}", manifest_path.display()))?;

        Ok(SynthArtifacts {
            templates,
            manifest: manifest_path,
        })
    }
}

/// Write an example configuration document for `environment`, refusing to
/// overwrite one that already exists
pub fn write_example<P: AsRef<Path>>(config_dir: P, environment: &str) -> Result<PathBuf> {
    let path = EnvResolver::document_path(config_dir.as_ref(), environment);
    if path.exists() {
        anyhow::bail!("configuration document {} already exists", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let rendered = serde_json::to_string_pretty(&ConfigDocument::example())
        .context("Failed to render example document")?;
    fs::write(&path, rendered)
        .with_context(|| format!("Failed to write example document {}", path.display()))?;

    Ok(path)
}

/// Artifacts produced by one synthesis run
#[derive(Debug)]
pub struct SynthArtifacts {
    /// Template files written, one per stack
    pub templates: Vec<PathBuf>,
    /// Path of the synthesis manifest
    pub manifest: PathBuf,
}

/// Index of the artifacts produced by one synthesis run
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Environment the stacks were synthesized for
    pub environment: String,
    /// Stage from the configuration document, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// When synthesis ran
    pub synthesized_at: DateTime<Utc>,
    /// Synthesized stacks in declaration order
    pub stacks: Vec<ManifestStack>,
}

/// One synthesized stack as recorded in the manifest
#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestStack {
    /// Physical stack name
    pub name: String,
    /// Template file name, relative to the manifest
    pub template_file: String,
    /// Account the stack is pinned to, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Region the stack is pinned to, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}
