use anyhow::Context;
use uni_config::DashConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`), apply flag overrides, validate.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DashConfig> {
    let mut config = DashConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(url) = &flags.api_url {
        config.api.base_url.clone_from(url);
    }
    config.validate()?;
    tracing::debug!(base_url = %config.api.base_url(), "configuration loaded");
    Ok(config)
}
