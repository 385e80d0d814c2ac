mod logging;

pub use logging::init_logging;

use fabric_dns_domain::config::Config;
use fabric_dns_domain::CliOverrides;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    Ok(config)
}
