//! Configuration loading for scaffolds.
//! Reads scaffolds.toml from the path in SCAFFOLDS_CONFIG or the current directory.
//! A missing file means defaults.

use scaffolds_common::error::ScaffoldError;
use scaffolds_molecules::chembl::ChemblSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "SCAFFOLDS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "scaffolds.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chembl: ChemblConfig,
    #[serde(default)]
    pub strip_it: StripItConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemblConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_organism")]
    pub organism: String,
    #[serde(default = "default_standard_type")]
    pub standard_type: String,
    #[serde(default = "default_activity_limit")]
    pub activity_limit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url()       -> String { scaffolds_molecules::chembl::CHEMBL_API_URL.to_string() }
fn default_organism()       -> String { "Homo sapiens".to_string() }
fn default_standard_type()  -> String { "IC50".to_string() }
fn default_activity_limit() -> usize  { 100 }
fn default_timeout_secs()   -> u64    { 30 }

impl Default for ChemblConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            organism: default_organism(),
            standard_type: default_standard_type(),
            activity_limit: default_activity_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ChemblConfig {
    pub fn settings(&self) -> ChemblSettings {
        ChemblSettings {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            organism: self.organism.clone(),
            standard_type: self.standard_type.clone(),
            activity_limit: self.activity_limit,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripItConfig {
    #[serde(default = "default_executable")]
    pub executable: String,
    #[serde(default = "default_input_format")]
    pub input_format: String,
}

fn default_executable()   -> String { "strip-it".to_string() }
fn default_input_format() -> String { "smiles".to_string() }

impl Default for StripItConfig {
    fn default() -> Self {
        Self { executable: default_executable(), input_format: default_input_format() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_workspace_path")]
    pub path: PathBuf,
}

fn default_workspace_path() -> PathBuf { PathBuf::from(".") }

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self { path: default_workspace_path() }
    }
}


impl Config {
    /// Load configuration. `explicit` (from `--config`) must exist; the
    /// SCAFFOLDS_CONFIG / ./scaffolds.toml fallback may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ScaffoldError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ScaffoldError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScaffoldError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
            .map_err(|e| ScaffoldError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
