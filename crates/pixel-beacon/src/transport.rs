//! HTTP transport for delivering beacons.

use crate::Error;
use tracing::{debug, warn};
use url::Url;

/// Fire-and-forget HTTP transport for pixel beacons.
///
/// Each beacon is a bare GET whose response is never read back by the caller.
#[derive(Debug, Clone)]
pub struct BeaconTransport {
    client: reqwest::Client,
}

impl BeaconTransport {
    /// Create a new beacon transport.
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Hand `url` to a background task and return immediately.
    ///
    /// Returns `false` when no tokio runtime is available to run the task, in
    /// which case the beacon is dropped.
    pub fn fire(&self, url: Url) -> bool {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!("no async runtime available, dropping beacon");
                return false;
            }
        };

        let client = self.client.clone();
        handle.spawn(async move {
            match client.get(url.clone()).send().await {
                Ok(response) => {
                    debug!(
                        status = %response.status(),
                        host = ?url.host_str(),
                        "beacon delivered"
                    );
                }
                Err(e) => {
                    warn!(error = %e, "beacon delivery failed");
                }
            }
        });

        true
    }
}
