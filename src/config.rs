// src/config.rs
use crate::api::parse_page_url;
use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_MODEL_ENDPOINT, DEFAULT_MODEL_NAME, MAX_MODEL_CHARS,
    SUMMARY_CONTEXT,
};
use crate::error::AppError;
use crate::output::ExportSettings;
use crate::types::{GenerationOptions, OutputFormat, SummaryLength, SummaryType, ValidationError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const ENDPOINT_ENV: &str = "STUDY_ASSISTANT_ENDPOINT";
pub const MODEL_ENV: &str = "STUDY_ASSISTANT_MODEL";

const MAX_RETRIES_LIMIT: u32 = 10;
const MAX_WATCH_SECONDS: u64 = 3600;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Page to study: a text or HTML file, an http(s) URL, or "-" for stdin
    pub source: String,

    /// Kind of summary to generate
    #[arg(long = "type", value_enum, default_value_t = SummaryType::Tldr)]
    pub summary_type: SummaryType,

    /// Markup of the summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Length of the summary
    #[arg(long, value_enum, default_value_t = SummaryLength::Short)]
    pub length: SummaryLength,

    /// Generate multiple-choice questions from the summary
    #[arg(long, default_value_t = false)]
    pub mcq: bool,

    /// Generate flashcards from the summary
    #[arg(long, default_value_t = false)]
    pub flashcards: bool,

    /// Extract keywords and highlight them in the page text
    #[arg(long, default_value_t = false)]
    pub highlight: bool,

    /// Answer the generated questions interactively (implies --mcq)
    #[arg(long, default_value_t = false)]
    pub quiz: bool,

    /// Compare the page with another page at this URL
    #[arg(long, value_name = "URL")]
    pub compare: Option<String>,

    /// Ask a follow-up question about the summary
    #[arg(long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Directory for summary.txt and flashcards.csv
    #[arg(short = 'o', long)]
    pub output_dir: Option<String>,

    /// Copy the summary to the clipboard
    #[arg(short = 'b', long, default_value_t = false)]
    pub clipboard: bool,

    /// Pipe mode - print only the summary to stdout
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Re-read a file source every N seconds and re-summarize when it changes
    #[arg(long, value_name = "SECONDS")]
    pub watch: Option<u64>,

    /// Model tag on the local model server (env: STUDY_ASSISTANT_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the local model server (env: STUDY_ASSISTANT_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Longest page, in characters, that will be summarized
    #[arg(long, default_value_t = MAX_MODEL_CHARS)]
    pub max_chars: usize,

    /// Retries after the first attempt for derived artifacts
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub retries: u32,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the page text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    File(PathBuf),
    Url(Url),
    Stdin,
}

impl SourceInput {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyField("source"));
        }
        if input == "-" {
            return Ok(Self::Stdin);
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            return parse_page_url(input).map(Self::Url);
        }
        Ok(Self::File(PathBuf::from(input)))
    }
}

/// Which derived artifacts this run asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactRequests {
    pub mcq: bool,
    pub flashcards: bool,
    pub highlight: bool,
    pub quiz: bool,
    pub compare: Option<Url>,
    pub question: Option<String>,
}

impl ArtifactRequests {
    pub fn any(&self) -> bool {
        self.mcq
            || self.flashcards
            || self.highlight
            || self.compare.is_some()
            || self.question.is_some()
    }
}

/// Validated session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub source: SourceInput,
    pub summary_options: GenerationOptions,
    pub requests: ArtifactRequests,
    pub export: ExportSettings,
    pub watch: Option<Duration>,
    pub endpoint: Url,
    pub model: String,
    pub max_chars: usize,
    pub max_retries: u32,
    pub verbose: bool,
}

impl SessionConfig {
    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolves with an explicit environment lookup. Flags win over the
    /// environment, which wins over built-in defaults.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let source = SourceInput::parse(&cli.source)?;

        let endpoint_str = cli
            .endpoint
            .or_else(|| env(ENDPOINT_ENV))
            .unwrap_or_else(|| DEFAULT_MODEL_ENDPOINT.to_string());
        let endpoint = parse_page_url(&endpoint_str)?;

        let model = cli
            .model
            .or_else(|| env(MODEL_ENV))
            .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
        validate_model_name(&model)?;

        if cli.max_chars == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: usize::MAX,
            }
            .into());
        }
        if cli.retries > MAX_RETRIES_LIMIT {
            return Err(ValidationError::OutOfBounds {
                value: cli.retries as usize,
                min: 0,
                max: MAX_RETRIES_LIMIT as usize,
            }
            .into());
        }

        let watch = match (cli.watch, &source) {
            (None, _) => None,
            (Some(secs), _) if secs == 0 || secs > MAX_WATCH_SECONDS => {
                return Err(ValidationError::OutOfBounds {
                    value: secs as usize,
                    min: 1,
                    max: MAX_WATCH_SECONDS as usize,
                }
                .into());
            }
            (Some(secs), SourceInput::File(_)) => Some(Duration::from_secs(secs)),
            (Some(_), _) => {
                log::warn!("--watch only applies to file sources; ignoring it");
                None
            }
        };

        let compare = cli
            .compare
            .as_deref()
            .map(parse_page_url)
            .transpose()?;
        let question = cli.ask.filter(|q| !q.trim().is_empty());

        Ok(SessionConfig {
            source,
            summary_options: GenerationOptions::new(SUMMARY_CONTEXT)
                .with_type(cli.summary_type)
                .with_format(cli.format)
                .with_length(cli.length),
            requests: ArtifactRequests {
                mcq: cli.mcq || cli.quiz,
                flashcards: cli.flashcards,
                highlight: cli.highlight,
                quiz: cli.quiz,
                compare,
                question,
            },
            export: ExportSettings {
                output_dir: cli.output_dir.map(PathBuf::from),
                clipboard: cli.clipboard,
                pipe: cli.pipe,
            },
            watch,
            endpoint,
            model,
            max_chars: cli.max_chars,
            max_retries: cli.retries,
            verbose: cli.verbose,
        })
    }
}

fn validate_model_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidModelName {
            name: name.to_string(),
            reason: "Model name cannot be empty".to_string(),
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidModelName {
            name: name.to_string(),
            reason: "Model name cannot contain whitespace".to_string(),
        });
    }
    Ok(())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source: SourceInput::Stdin,
            summary_options: GenerationOptions::new(SUMMARY_CONTEXT),
            requests: ArtifactRequests::default(),
            export: ExportSettings::default(),
            watch: None,
            endpoint: Url::parse(DEFAULT_MODEL_ENDPOINT)
                .expect("default endpoint should be a valid URL"),
            model: DEFAULT_MODEL_NAME.to_string(),
            max_chars: MAX_MODEL_CHARS,
            max_retries: DEFAULT_MAX_RETRIES,
            verbose: false,
        }
    }
}
