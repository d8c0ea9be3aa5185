use crate::error::{BadEnvVarSnafu, ParseTimeoutSnafu, RosterResult};
use dotenvy::var;
use snafu::ResultExt;
use std::{num::NonZeroU64, sync::Arc, time::Duration};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    backend_config: Arc<BackendConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            backend_config: Arc::new(BackendConfig::new()?),
        })
    }

    #[cfg(test)]
    pub fn from_backend_config(backend_config: BackendConfig) -> Self {
        Self {
            backend_config: Arc::new(backend_config),
        }
    }

    pub fn backend_config(&self) -> Arc<BackendConfig> {
        self.backend_config.clone()
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    base_url: String,
    timeout: Duration,
}

impl BackendConfig {
    pub fn new() -> RosterResult<Self> {
        let base_url = var("ROSTER_BACKEND_URL").context(BadEnvVarSnafu {
            name: "ROSTER_BACKEND_URL",
        })?;

        let timeout = match var("ROSTER_REQUEST_TIMEOUT_SECS") {
            Ok(secs) => parse_timeout(&secs)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self::with_base_url(base_url, timeout))
    }

    ///always stores the url with exactly one trailing slash so relative paths can be appended
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into().trim_end_matches('/').to_string();
        base_url.push('/');

        Self { base_url, timeout }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url_for(&self, path: impl AsRef<str>) -> String {
        format!("{}{}", self.base_url, path.as_ref())
    }
}

///rejects zero as well as anything that isn't a whole number of seconds
fn parse_timeout(secs: &str) -> RosterResult<Duration> {
    let secs: NonZeroU64 = secs
        .trim()
        .parse()
        .context(ParseTimeoutSnafu { original: secs })?;
    Ok(Duration::from_secs(secs.get()))
}
