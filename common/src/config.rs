use serde::Deserialize;
use std::{error::Error, path::Path};

use crate::yaml_include::load_yaml_with_includes;

pub const DEFAULT_FAKE_REVIEWS_FILE_NAME: &str = "fake_reviews.csv";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommonConfig {
    pub project_name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalyzerConfig {
    pub log_level: String,
    pub output_dir: String,
    #[serde(default = "default_fake_reviews_file_name")]
    pub fake_reviews_file_name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BackendConfig {
    pub server_address: String,
    pub log_level: String,
    pub allowed_origin: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub common: CommonConfig,
    pub analyzer: AnalyzerConfig,
    pub backend: BackendConfig,
}

fn default_fake_reviews_file_name() -> String {
    DEFAULT_FAKE_REVIEWS_FILE_NAME.to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Config {
    /// Loads a config file, resolving `!include` lines relative to it.
    pub fn load(config_path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let yaml = load_yaml_with_includes(Path::new(config_path))
            .map_err(|e| format!("Failed to load config {}: {}", config_path, e))?;

        let mut contents = String::new();
        {
            let mut emitter = yaml_rust2::YamlEmitter::new(&mut contents);
            emitter.dump(&yaml)?;
        }

        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let config = serde_yml::from_str(contents)?;
        Ok(config)
    }
}
