//! Credit card statement parser CLI.
//!
//! Thin front end over the `statement_parser` library: picks a PDF (a bundled
//! sample or any path), runs pattern or assisted extraction, prints the
//! report as JSON and writes it to a file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

use statement_parser::extraction::{AssistedExtractor, ExtractionMode, PatternExtractor};
use statement_parser::pdf::save_raw_text;
use statement_parser::{
    create_provider, extract_text_from_pdf, Config, ExtractionService, ProviderKind,
};

/// Credit Card Statement Parser
///
/// Extract card last 4 digits, statement period, payment due date, total
/// amount due and credit limit from credit card statement PDFs.
#[derive(Parser)]
#[command(name = "statement-parser")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./statement-parser.toml when present)
    #[arg(short, long, global = true, value_name = "FILE", env = "STATEMENT_PARSER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract statement fields from a PDF
    Extract {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE", required_unless_present = "sample")]
        input: Option<PathBuf>,

        /// Bundled sample statement, by name or 1-based index
        #[arg(short, long, value_name = "NAME", conflicts_with = "input")]
        sample: Option<String>,

        /// Extraction method: pattern or assisted
        #[arg(short, long, default_value = "pattern")]
        mode: ExtractionMode,

        /// Language model provider for assisted mode: groq or gemini
        #[arg(short, long, default_value = "groq")]
        provider: ProviderKind,

        /// API key for the provider (defaults to GROQ_API_KEY / GEMINI_API_KEY)
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,

        /// Result file (defaults to <output_dir>/extracted_<name>.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the extracted raw text to the output directory
        #[arg(long)]
        save_raw: bool,

        /// Use pattern extraction if assisted extraction is unavailable
        #[arg(long)]
        fallback: bool,
    },

    /// List bundled sample statements
    Samples,

    /// Extract raw text from a PDF (for debugging patterns)
    Text {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Options for a single extraction run.
struct ExtractRequest {
    input: PathBuf,
    mode: ExtractionMode,
    provider: ProviderKind,
    api_key: Option<String>,
    output: Option<PathBuf>,
    save_raw: bool,
    fallback: bool,
}

/// Command handler holding the loaded configuration.
struct ExtractionHandler {
    config: Config,
    verbose: bool,
}

impl ExtractionHandler {
    fn new(config: Config, verbose: bool) -> Self {
        Self { config, verbose }
    }

    /// Resolves `--input` or `--sample` to a file path.
    fn resolve_input(&self, input: Option<PathBuf>, sample: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = input {
            return Ok(path);
        }
        let selector = sample.ok_or_else(|| anyhow::anyhow!("--input or --sample is required"))?;
        let sample = self.config.find_sample(selector).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown sample '{}'. Run 'statement-parser samples' to list them.",
                selector
            )
        })?;
        Ok(self.config.sample_path(sample))
    }

    /// Builds the service for the requested mode.
    ///
    /// The credential is resolved here, from `--api-key` or the provider's
    /// environment variable, and handed to the extractor explicitly.
    fn build_service(&self, request: &ExtractRequest) -> ExtractionService {
        match request.mode {
            ExtractionMode::Pattern => ExtractionService::with_patterns(),
            ExtractionMode::Assisted => {
                let credential = request
                    .api_key
                    .clone()
                    .or_else(|| std::env::var(request.provider.credential_env()).ok());
                if credential.is_none() {
                    log::debug!("{} is not set", request.provider.credential_env());
                }

                let provider = create_provider(request.provider, &self.config.assisted);
                let extractor = AssistedExtractor::new(provider, credential)
                    .with_max_chars(self.config.assisted.max_chars);
                let service = ExtractionService::new(Box::new(extractor));

                if request.fallback {
                    service.with_fallback(Box::new(PatternExtractor::new()))
                } else {
                    service
                }
            }
        }
    }

    /// Executes an extraction.
    fn extract(&self, request: ExtractRequest) -> Result<()> {
        let input = &request.input;
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statement".to_string());

        if self.verbose {
            eprintln!("Input:  {}", input.display());
            eprintln!("Mode:   {}", request.mode);
            if request.mode == ExtractionMode::Assisted {
                eprintln!("Provider: {}", request.provider);
            }
        }

        let text = extract_text_from_pdf(input).with_context(|| "Text extraction failed")?;

        if request.save_raw {
            let raw_path = save_raw_text(&self.config.output_dir, &stem, &text)
                .with_context(|| "Failed to save raw text")?;
            eprintln!("✓ Raw text → {}", raw_path.display());
        }

        let service = self.build_service(&request);
        let mut report = service
            .extract_text(&text)
            .with_context(|| "Extraction failed")?;
        if let Some(name) = input.file_name() {
            report = report.with_source(name.to_string_lossy());
        }

        let json = report.to_json()?;
        println!("{}", json);

        let output = request.output.clone().unwrap_or_else(|| {
            self.config
                .output_dir
                .join(format!("extracted_{}.json", stem))
        });
        write_file(&output, &json)?;

        if report.fields_extracted > 0 {
            eprintln!(
                "✓ Extracted {}/5 fields ({} confidence, {}) → {}",
                report.fields_extracted,
                report.confidence,
                report.extraction_method,
                output.display()
            );
            let missing: Vec<&str> = report
                .record
                .missing_fields()
                .into_iter()
                .map(|f| f.label())
                .collect();
            if !missing.is_empty() {
                eprintln!("  Not found: {}", missing.join(", "));
            }
        } else {
            eprintln!("⚠ No fields found → {}", output.display());
        }

        if let Some(reason) = &report.fallback_reason {
            eprintln!("⚠ Assisted extraction unavailable, used patterns: {}", reason);
        }

        Ok(())
    }

    /// Lists configured samples.
    fn samples(&self) {
        if self.config.samples.is_empty() {
            println!("No sample statements configured");
            return;
        }
        for (i, sample) in self.config.samples.iter().enumerate() {
            let path = self.config.sample_path(sample);
            let marker = if path.exists() { " " } else { "!" };
            println!("{}{:>2}. {} ({})", marker, i + 1, sample.name, path.display());
        }
    }

    /// Extracts text from a PDF.
    fn text(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let text = extract_text_from_pdf(input).with_context(|| "Text extraction failed")?;

        if let Some(output_path) = output {
            write_file(output_path, &text)?;
            eprintln!(
                "✓ Extracted {} characters → {}",
                text.chars().count(),
                output_path.display()
            );
        } else {
            println!("{}", text);
        }

        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write to {}", path.display()))
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init().ok();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::load(cli.config.as_deref()).with_context(|| "Failed to load configuration")?;
    let handler = ExtractionHandler::new(config, cli.verbose);

    match cli.command {
        Commands::Extract {
            input,
            sample,
            mode,
            provider,
            api_key,
            output,
            save_raw,
            fallback,
        } => {
            let input = handler.resolve_input(input, sample.as_deref())?;
            handler.extract(ExtractRequest {
                input,
                mode,
                provider,
                api_key,
                output,
                save_raw,
                fallback,
            })?;
        }
        Commands::Samples => handler.samples(),
        Commands::Text { input, output } => handler.text(&input, output.as_deref())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> ExtractionHandler {
        ExtractionHandler::new(Config::default(), false)
    }

    fn request(mode: ExtractionMode, fallback: bool) -> ExtractRequest {
        ExtractRequest {
            input: PathBuf::from("statement.pdf"),
            mode,
            provider: ProviderKind::Gemini,
            api_key: None,
            output: None,
            save_raw: false,
            fallback,
        }
    }

    #[test]
    fn test_resolve_input() {
        let handler = handler();

        let path = handler
            .resolve_input(Some(PathBuf::from("a.pdf")), None)
            .unwrap();
        assert_eq!(path, PathBuf::from("a.pdf"));

        let path = handler.resolve_input(None, Some("4")).unwrap();
        assert_eq!(
            path,
            PathBuf::from("sample_statements").join("statement_4.pdf")
        );

        assert!(handler.resolve_input(None, Some("nope")).is_err());
    }

    #[test]
    fn test_service_selection() {
        let handler = handler();
        assert_eq!(
            handler
                .build_service(&request(ExtractionMode::Pattern, false))
                .method(),
            "pattern"
        );
        assert_eq!(
            handler
                .build_service(&request(ExtractionMode::Assisted, true))
                .method(),
            "assisted_gemini"
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "statement-parser",
            "extract",
            "--sample",
            "2",
            "--mode",
            "assisted",
            "--provider",
            "gemini",
            "--fallback",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract {
                sample,
                mode,
                provider,
                fallback,
                ..
            } => {
                assert_eq!(sample.as_deref(), Some("2"));
                assert_eq!(mode, ExtractionMode::Assisted);
                assert_eq!(provider, ProviderKind::Gemini);
                assert!(fallback);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_input_and_sample_conflict() {
        let result = Cli::try_parse_from([
            "statement-parser",
            "extract",
            "--input",
            "a.pdf",
            "--sample",
            "1",
        ]);
        assert!(result.is_err());
    }
}
