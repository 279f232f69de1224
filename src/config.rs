// src/config.rs
use crate::constants::{DEFAULT_REQUESTS_PER_SECOND, DEFAULT_STATUS_TAG};
use crate::error::AppError;
use crate::types::{ApiKey, LocaleCode, PageId};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How image files are named on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImageFileNameFormat {
    /// `{page slug}.{block id}`: stable across runs, never refreshed.
    #[default]
    Default,
    /// First characters of the SHA-256 of the image bytes.
    ContentHash,
    /// Hash of the UUID in the image url.
    Legacy,
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion integration token (falls back to NOTION_API_KEY)
    #[arg(short = 'n', long)]
    pub notion_token: Option<String>,

    /// URL or ID of the outline page at the root of the docs
    pub root_page: String,

    /// Directory the Markdown files are written to
    #[arg(short = 'm', long, default_value = "./docs")]
    pub markdown_output_path: String,

    /// Directory for image files (defaults to next to each page)
    #[arg(short = 'i', long)]
    pub img_output_path: Option<String>,

    /// Path prefix for images in Markdown (defaults to ".")
    #[arg(short = 'p', long)]
    pub img_prefix_in_markdown: Option<String>,

    /// How image files are named
    #[arg(long, value_enum, default_value_t = ImageFileNameFormat::Default)]
    pub image_file_name_format: ImageFileNameFormat,

    /// Comma separated locale codes to write localized image copies for (e.g. "fr,de")
    #[arg(short = 'l', long, value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Database pages are published only when their Status matches ("*" publishes all)
    #[arg(short = 's', long, default_value = DEFAULT_STATUS_TAG)]
    pub status_tag: String,

    /// Notion API requests per second
    #[arg(long, default_value_t = DEFAULT_REQUESTS_PER_SECOND)]
    pub requests_per_second: u32,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Image placement options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageOptions {
    pub output_path: Option<PathBuf>,
    pub prefix_in_markdown: Option<String>,
    pub file_name_format: ImageFileNameFormat,
}

/// The per-run settings page conversion reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    pub markdown_output_path: PathBuf,
    /// Docusaurus project root; localized assets go under `i18n/` here.
    pub site_root: PathBuf,
    pub images: ImageOptions,
    pub locales: Vec<LocaleCode>,
    pub status_tag: String,
}

impl ConversionOptions {
    pub fn new(markdown_output_path: impl Into<PathBuf>) -> Self {
        Self {
            markdown_output_path: markdown_output_path.into(),
            site_root: PathBuf::from("."),
            images: ImageOptions::default(),
            locales: Vec::new(),
            status_tag: DEFAULT_STATUS_TAG.to_string(),
        }
    }

    /// Whether a page with `status` gets published.
    pub fn publishes_status(&self, status: Option<&str>) -> bool {
        self.status_tag == "*" || status == Some(self.status_tag.as_str())
    }
}

/// Resolved pipeline configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub root_page: PageId,
    pub api_key: ApiKey,
    pub requests_per_second: u32,
    pub verbose: bool,
    pub conversion: ConversionOptions,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key_str = match cli.notion_token {
            Some(token) => token,
            None => std::env::var("NOTION_API_KEY").map_err(|_| {
                AppError::MissingConfiguration(
                    "pass --notion-token or set the NOTION_API_KEY environment variable"
                        .to_string(),
                )
            })?,
        };

        let api_key = ApiKey::new(api_key_str)?;
        let root_page = PageId::parse(&cli.root_page)?;

        let locales = cli
            .locales
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(LocaleCode::new)
            .collect::<Result<Vec<_>, _>>()?;

        if cli.requests_per_second == 0 {
            return Err(AppError::MissingConfiguration(
                "--requests-per-second must be at least 1".to_string(),
            ));
        }

        let conversion = ConversionOptions {
            images: ImageOptions {
                output_path: cli.img_output_path.map(PathBuf::from),
                prefix_in_markdown: cli.img_prefix_in_markdown,
                file_name_format: cli.image_file_name_format,
            },
            locales,
            status_tag: cli.status_tag,
            ..ConversionOptions::new(cli.markdown_output_path)
        };

        Ok(PipelineConfig {
            root_page,
            api_key,
            requests_per_second: cli.requests_per_second,
            verbose: cli.verbose,
            conversion,
        })
    }
}
