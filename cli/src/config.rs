use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use emulator::SamplerConfig;
use routing::{RoutingConfig, TravelMode};

/// Everything a config file may set. Command line flags and environment variables win over it.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub sampler: SamplerConfig,
    pub routing: RoutingFile,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RoutingFile {
    pub api_key: Option<String>,
    pub travel_mode: Option<TravelMode>,
    pub base_url: Option<String>,
    pub timeout_s: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs_err::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|err| anyhow!("Couldn't parse {}: {}", path.display(), err))?;
        Ok(config)
    }

    pub fn routing(
        &self,
        api_key: Option<String>,
        travel_mode: Option<TravelMode>,
    ) -> Result<RoutingConfig> {
        let api_key = match api_key.or_else(|| self.routing.api_key.clone()) {
            Some(key) if !key.is_empty() => key,
            _ => bail!(
                "An Azure Maps subscription key is required. Pass --api-key, set \
                 AZURE_MAPS_SUBSCRIPTION_KEY, or put routing.api_key in the config file"
            ),
        };
        let mut config = RoutingConfig::new(api_key);
        if let Some(mode) = travel_mode.or(self.routing.travel_mode) {
            config.travel_mode = mode;
        }
        if let Some(ref url) = self.routing.base_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(timeout_s) = self.routing.timeout_s {
            config.timeout_s = timeout_s;
        }
        Ok(config)
    }
}
