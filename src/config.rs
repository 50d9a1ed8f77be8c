//! Runtime configuration.
//!
//! Loaded from a TOML file when one is given or when `statement-parser.toml`
//! exists in the working directory; every key is optional and falls back to
//! the defaults below. API keys are deliberately not part of this file: the
//! CLI resolves them from flags or environment variables and hands them to
//! the assisted extractor explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ParserError, ParserResult};
use crate::providers::{gemini, groq};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "statement-parser.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the bundled sample statements.
    pub sample_dir: PathBuf,
    /// Directory results and raw text are written to.
    pub output_dir: PathBuf,
    pub samples: Vec<SampleStatement>,
    pub assisted: AssistedConfig,
}

/// A bundled statement selectable by name or position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleStatement {
    pub name: String,
    /// Relative paths resolve against `sample_dir`.
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistedConfig {
    /// Upper bound on a single model request.
    pub timeout_secs: u64,
    /// Document characters sent to the model.
    pub max_chars: usize,
    pub groq: ProviderSettings,
    pub gemini: ProviderSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub model: String,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let samples = [
            ("Sample 1 - Axis Bank", "statement_1.pdf"),
            ("Sample 2 - IDFC Bank", "statement_2.pdf"),
            ("Sample 3 - HDFC Bank", "statement_3.pdf"),
            ("Sample 4 - ICICI Bank", "statement_4.pdf"),
            ("Sample 5 - SBI Card", "statement_5.pdf"),
        ]
        .into_iter()
        .map(|(name, file)| SampleStatement {
            name: name.to_string(),
            file: PathBuf::from(file),
        })
        .collect();

        Self {
            sample_dir: PathBuf::from("sample_statements"),
            output_dir: PathBuf::from("outputs"),
            samples,
            assisted: AssistedConfig::default(),
        }
    }
}

impl Default for AssistedConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_chars: 5000,
            groq: ProviderSettings {
                model: groq::DEFAULT_MODEL.to_string(),
                base_url: groq::DEFAULT_BASE_URL.to_string(),
            },
            gemini: ProviderSettings {
                model: gemini::DEFAULT_MODEL.to_string(),
                base_url: gemini::DEFAULT_BASE_URL.to_string(),
            },
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, `statement-parser.toml` in
    /// the working directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> ParserResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> ParserResult<Self> {
        let s = fs::read_to_string(path).map_err(|e| ParserError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&s).map_err(|reason| ParserError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(s: &str) -> Result<Self, String> {
        toml::from_str(s).map_err(|e| e.to_string())
    }

    /// Finds a sample by 1-based index or case-insensitive name.
    ///
    /// A name that is not an exact match selects the single sample whose
    /// name contains it; ambiguous fragments select nothing.
    pub fn find_sample(&self, selector: &str) -> Option<&SampleStatement> {
        let selector = selector.trim();
        if let Ok(index) = selector.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| self.samples.get(i));
        }

        let wanted = selector.to_lowercase();
        if let Some(exact) = self
            .samples
            .iter()
            .find(|s| s.name.to_lowercase() == wanted)
        {
            return Some(exact);
        }

        let mut partial = self
            .samples
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&wanted));
        match (partial.next(), partial.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Full path of a sample file.
    pub fn sample_path(&self, sample: &SampleStatement) -> PathBuf {
        if sample.file.is_absolute() {
            sample.file.clone()
        } else {
            self.sample_dir.join(&sample.file)
        }
    }
}
