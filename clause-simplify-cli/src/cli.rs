//! Command line arguments and dispatch.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use clause_simplify::{
    render_json, ContractPipeline, ExtractiveSummarizer, PipelineOutcome, ReportDisplay,
    SimplifyConfig,
};
use clause_simplify_hf::HfSummarizer;

use crate::sample::SAMPLE_CONTRACT;

/// Summarization backend to use for key clauses.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Hosted inference API (model and endpoint from the config file)
    Hf,
    /// Offline leading-sentence extraction
    Extractive,
}

/// Output format for the results.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "clause-simplify",
    version,
    about = "Find key clauses in a contract and simplify them with a summarization model."
)]
pub struct Cli {
    /// Contract text file, or `-` for stdin. The built-in sample contract is used when omitted.
    pub input: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Key-clause keyword; repeat to replace the configured list
    #[arg(long = "keyword", value_name = "TERM")]
    pub keywords: Vec<String>,

    /// Minimum summary length in model tokens
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Maximum summary length in model tokens
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Clauses with this many words or fewer are kept as is
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Only treat labels at the start of a line as clause boundaries
    #[arg(long)]
    pub anchored: bool,

    #[arg(long, value_enum, default_value_t = Backend::Hf)]
    pub backend: Backend,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Wrap text output to this many columns
    #[arg(long)]
    pub width: Option<usize>,

    /// Print the segmented clauses and exit without simplifying
    #[arg(long)]
    pub list_clauses: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.resolve_config()?;
        let text = self.read_input()?;
        let pipeline = ContractPipeline::from_config(&config);

        if self.list_clauses {
            for (idx, clause) in pipeline.segment(&text).iter().enumerate() {
                println!("{:>3}. {}", idx + 1, clause);
            }
            return Ok(());
        }

        if self.format == Format::Text {
            println!("Processing contract...\n");
        }

        tracing::info!(
            input = %self.input_source(),
            backend = ?self.backend,
            key_clauses = pipeline.key_clauses(&text).len(),
            "processing contract"
        );

        let outcome = match self.backend {
            Backend::Hf => pipeline
                .run_with_loader(&text, || HfSummarizer::load(&config.model))
                .context("summarization backend unavailable")?,
            Backend::Extractive => pipeline.run(&text, &ExtractiveSummarizer),
        };

        self.print(&outcome)
    }

    /// Config file values with command line overrides applied.
    pub fn resolve_config(&self) -> Result<SimplifyConfig> {
        let mut config = match &self.config {
            Some(path) if !path.exists() => bail!("config file not found: {}", path.display()),
            Some(path) => SimplifyConfig::load(path)?,
            None => SimplifyConfig::default(),
        };

        if !self.keywords.is_empty() {
            config.keywords = self.keywords.clone();
        }
        if let Some(min_length) = self.min_length {
            config.summary.min_length = min_length;
        }
        if let Some(max_length) = self.max_length {
            config.summary.max_length = max_length;
        }
        if let Some(min_words) = self.min_words {
            config.min_words = min_words;
        }
        if self.anchored {
            config.anchored_labels = true;
        }

        let overrides = self.overrides();
        if !overrides.is_empty() {
            tracing::debug!(?overrides, "applied command line overrides");
        }
        config.validate()?;
        Ok(config)
    }

    /// Config settings replaced by command line flags.
    pub fn overrides(&self) -> Vec<&'static str> {
        let mut applied = Vec::new();
        if !self.keywords.is_empty() {
            applied.push("keywords");
        }
        if self.min_length.is_some() {
            applied.push("summary.min_length");
        }
        if self.max_length.is_some() {
            applied.push("summary.max_length");
        }
        if self.min_words.is_some() {
            applied.push("min_words");
        }
        if self.anchored {
            applied.push("anchored_labels");
        }
        applied
    }

    /// Where the contract text comes from, for logs.
    pub fn input_source(&self) -> String {
        match &self.input {
            None => "built-in sample".to_string(),
            Some(path) if path.as_os_str() == "-" => "stdin".to_string(),
            Some(path) => path.display().to_string(),
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            None => Ok(SAMPLE_CONTRACT.to_string()),
            Some(path) if path.as_os_str() == "-" => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read contract from stdin")?;
                Ok(text)
            }
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read contract: {}", path.display())),
        }
    }

    fn print(&self, outcome: &PipelineOutcome) -> Result<()> {
        match self.format {
            Format::Text => {
                print!("{}", ReportDisplay::new(outcome).with_width(self.width));
                if outcome.is_empty() {
                    println!("No relevant clauses found.");
                }
            }
            Format::Json => println!("{}", render_json(outcome)?),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["clause-simplify"]).unwrap();
        assert_eq!(cli.backend, Backend::Hf);
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.resolve_config().unwrap(), SimplifyConfig::default());
        assert!(cli.overrides().is_empty());
        assert_eq!(cli.input_source(), "built-in sample");
    }

    #[test]
    fn dash_reads_stdin() {
        let cli = Cli::try_parse_from(["clause-simplify", "-", "--min-words", "8"]).unwrap();
        assert_eq!(cli.input_source(), "stdin");
        assert_eq!(cli.overrides(), ["min_words"]);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "clause-simplify",
            "contract.txt",
            "--keyword",
            "Warranty",
            "--keyword",
            "notice",
            "--max-length",
            "40",
            "--min-length",
            "10",
            "--anchored",
            "--backend",
            "extractive",
            "--format",
            "json",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(
            cli.overrides(),
            ["keywords", "summary.min_length", "summary.max_length", "anchored_labels"]
        );
        assert_eq!(cli.input_source(), "contract.txt");
        assert_eq!(config.keyword_set().terms(), ["warranty", "notice"]);
        assert_eq!(config.summary.min_length, 10);
        assert_eq!(config.summary.max_length, 40);
        assert!(config.anchored_labels);
        assert_eq!(cli.backend, Backend::Extractive);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let cli = Cli::try_parse_from(["clause-simplify", "--min-length", "200"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["clause-simplify", "--config", "/nonexistent/simplify.toml"])
            .unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn sample_contract_lists_six_clauses() {
        let pipeline = ContractPipeline::new();
        assert_eq!(pipeline.segment(SAMPLE_CONTRACT).len(), 6);
        assert_eq!(pipeline.key_clauses(SAMPLE_CONTRACT).len(), 3);
    }
}
