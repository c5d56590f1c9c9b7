//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::Dataset;
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::types::Cursor;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

/// Options of the `run` command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Kind to query
    pub kind: String,
    /// Base64 cursor to resume from
    pub start_cursor: Option<String>,
    /// Overall query limit
    pub limit: Option<u32>,
    /// Page fetch cap
    pub request_limit: Option<u32>,
    /// Entity cap
    pub take: Option<usize>,
    /// Emit cursors alongside entities
    pub with_cursor: bool,
}

/// What a `run` produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Lines written
    pub emitted: usize,
    /// Page fetches issued
    pub fetches: u32,
    /// Cursor to resume after the last emitted entity, or the start cursor
    /// when nothing was emitted
    pub resume_cursor: Option<Cursor>,
    /// Whether the request limit cut the query short
    pub truncated: bool,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                kind,
                start_cursor,
                limit,
                request_limit,
                take,
                with_cursor,
            } => {
                let options = RunOptions {
                    kind: kind.clone(),
                    start_cursor: start_cursor.clone(),
                    limit: *limit,
                    request_limit: *request_limit,
                    take: *take,
                    with_cursor: *with_cursor,
                };
                let dataset = Dataset::from_config(&self.load_config()?)?;
                let format = self.cli.format;
                let summary = run_query(&dataset, &options, |line| output_line(format, line)).await?;

                info!(
                    "Emitted {} entities over {} requests (truncated: {})",
                    summary.emitted, summary.fetches, summary.truncated
                );
                if let Some(cursor) = &summary.resume_cursor {
                    info!("Resume with --start-cursor {}", cursor);
                }
                Ok(())
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load configuration: file, then environment, then flags
    fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };

        let mut config = config.with_env();
        if let Some(project) = &self.cli.project {
            config.project_id.clone_from(project);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;

        output_line(
            self.cli.format,
            &json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": format!(
                        "Config for project '{}' at {} is valid",
                        config.project_id, config.endpoint
                    )
                }
            }),
        );

        Ok(())
    }
}

/// Run a kind query, handing each output line to `emit`
pub async fn run_query<F>(dataset: &Dataset, options: &RunOptions, mut emit: F) -> Result<RunSummary>
where
    F: FnMut(&Value),
{
    let start = options
        .start_cursor
        .as_deref()
        .map(Cursor::from_base64)
        .transpose()?;

    let mut query = dataset.query(&options.kind);
    if let Some(cursor) = &start {
        query = query.start(cursor.clone());
    }
    if let Some(limit) = options.limit {
        query = query.limit(limit);
    }

    let mut iter = dataset.run(query);
    if let Some(limit) = options.request_limit {
        iter = iter.with_request_limit(limit);
    }

    let started = Instant::now();
    let mut emitted = 0;
    // Nothing emitted means the caller should resume where it started
    let mut last_cursor = start;

    while options.take.map_or(true, |take| emitted < take) {
        let Some((entity, cursor)) = iter.next_with_cursor().await? else {
            break;
        };

        let line = if options.with_cursor {
            json!({ "entity": entity, "cursor": cursor })
        } else {
            serde_json::to_value(&entity).context("Failed to encode entity")?
        };
        emit(&line);

        emitted += 1;
        last_cursor = Some(cursor);
    }

    info!(
        "Query over {} finished in {:?}, end cursor: {:?}",
        options.kind,
        started.elapsed(),
        iter.end_cursor()
    );

    Ok(RunSummary {
        emitted,
        fetches: iter.fetch_count(),
        resume_cursor: last_cursor,
        truncated: iter.is_truncated(),
    })
}

/// Output a line
fn output_line(format: OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value).unwrap_or_default());
        }
        OutputFormat::Pretty => {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
        }
    }
}
