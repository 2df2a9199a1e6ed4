//! Tracker configuration.

use crate::environment::{Environment, LiveEnvironment, NoopEnvironment};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Default beacon endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.facebook.com/tr/";

/// Pixel tracker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) pixel_id: String,
    pub(crate) endpoint: Url,
}

impl Config {
    /// Get the pixel id.
    pub fn pixel_id(&self) -> &str {
        &self.pixel_id
    }

    /// Get the beacon endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Which environment the built tracker runs against.
#[derive(Clone)]
enum EnvironmentChoice {
    Live,
    Offline,
    Custom(Arc<dyn Environment>),
}

impl fmt::Debug for EnvironmentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentChoice::Live => f.write_str("Live"),
            EnvironmentChoice::Offline => f.write_str("Offline"),
            EnvironmentChoice::Custom(env) => f.debug_tuple("Custom").field(env).finish(),
        }
    }
}

/// Builder for a pixel tracker.
#[derive(Debug)]
pub struct PixelTrackerBuilder {
    pixel_id: String,
    endpoint: Option<String>,
    environment: EnvironmentChoice,
}

impl PixelTrackerBuilder {
    /// Create a new builder with the given pixel id.
    pub fn new(pixel_id: impl Into<String>) -> Self {
        Self {
            pixel_id: pixel_id.into(),
            endpoint: None,
            environment: EnvironmentChoice::Live,
        }
    }

    /// Set the beacon endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Disable hashing and delivery. Requests are built and dropped.
    pub fn offline(mut self) -> Self {
        self.environment = EnvironmentChoice::Offline;
        self
    }

    /// Use a custom environment.
    pub fn environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = EnvironmentChoice::Custom(environment);
        self
    }

    /// Build the configuration.
    pub(crate) fn build_config(&self) -> Result<Config, crate::Error> {
        if self.pixel_id.is_empty() {
            return Err(crate::Error::Config("pixel_id cannot be empty".into()));
        }

        let raw = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let endpoint = Url::parse(raw)
            .map_err(|e| crate::Error::Config(format!("invalid endpoint `{}`: {}", raw, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(crate::Error::Config(format!(
                "endpoint `{}` is not an absolute URL",
                raw
            )));
        }
        // Beacon params are appended to the endpoint; a preset query would duplicate them
        if endpoint.query().is_some() || endpoint.fragment().is_some() {
            return Err(crate::Error::Config(format!(
                "endpoint `{}` must not carry a query or fragment",
                raw
            )));
        }

        Ok(Config {
            pixel_id: self.pixel_id.clone(),
            endpoint,
        })
    }

    /// Resolve the environment.
    pub(crate) fn build_environment(&self) -> Result<Arc<dyn Environment>, crate::Error> {
        Ok(match &self.environment {
            EnvironmentChoice::Live => Arc::new(LiveEnvironment::new()?),
            EnvironmentChoice::Offline => Arc::new(NoopEnvironment),
            EnvironmentChoice::Custom(env) => env.clone(),
        })
    }
}
