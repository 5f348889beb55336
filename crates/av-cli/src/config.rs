use anyhow::{Context, Result};
use av_core::Config as CoreConfig;
use av_loaders::LoaderConfig;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Config {
  pub api_config: CoreConfig,
  pub loader_config: LoaderConfig,
}

impl Config {
  pub fn load(api_key_file: &Path, max_api_calls: u64, show_progress: bool) -> Result<Self> {
    let api_config = CoreConfig::from_env_or_key_file(api_key_file).with_context(|| {
      format!("No API key: set ALPHA_VANTAGE_API_KEY or create {}", api_key_file.display())
    })?;

    let loader_config =
      LoaderConfig { show_progress, max_api_calls: Some(max_api_calls), ..LoaderConfig::default() };

    Ok(Self { api_config, loader_config })
  }
}
