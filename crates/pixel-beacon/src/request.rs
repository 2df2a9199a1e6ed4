//! Beacon URL construction.

use crate::environment::Environment;
use crate::normalize::normalize;
use crate::types::{CustomData, UserData};
use tracing::debug;
use url::Url;

/// Query key carrying the pixel id.
pub const PARAM_PIXEL_ID: &str = "id";
/// Query key carrying the event name.
pub const PARAM_EVENT: &str = "ev";
/// Query key carrying the deduplication id.
pub const PARAM_EVENT_ID: &str = "eid";

/// Query key for a hashed user data field, e.g. `ud[em]`.
pub fn user_data_param(key: &str) -> String {
    format!("ud[{}]", key)
}

/// Query key for a custom data field, e.g. `cd[value]`.
pub fn custom_data_param(key: &str) -> String {
    format!("cd[{}]", key)
}

/// A fully assembled beacon, built fresh for every tracking call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRequest {
    event_name: String,
    url: Url,
}

impl TrackingRequest {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

/// Assembles a [`TrackingRequest`] for one event.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    endpoint: &'a Url,
    pixel_id: &'a str,
    event_name: &'a str,
    event_id: Option<&'a str>,
    user_data: Option<&'a UserData>,
    custom_data: Option<&'a CustomData>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(endpoint: &'a Url, pixel_id: &'a str, event_name: &'a str) -> Self {
        Self {
            endpoint,
            pixel_id,
            event_name,
            event_id: None,
            user_data: None,
            custom_data: None,
        }
    }

    /// Set the deduplication id, sent verbatim.
    pub fn event_id(mut self, event_id: Option<&'a str>) -> Self {
        self.event_id = event_id;
        self
    }

    pub fn user_data(mut self, user_data: Option<&'a UserData>) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn custom_data(mut self, custom_data: Option<&'a CustomData>) -> Self {
        self.custom_data = custom_data;
        self
    }

    /// Build the request, hashing user data through `env`.
    ///
    /// Empty user data values are skipped. A field whose digest is unavailable
    /// is skipped as well rather than sent with an empty hash.
    pub fn build(self, env: &dyn Environment) -> TrackingRequest {
        let mut url = self.endpoint.clone();
        let mut hashed_fields = 0usize;
        let mut custom_fields = 0usize;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(PARAM_PIXEL_ID, self.pixel_id);
            query.append_pair(PARAM_EVENT, self.event_name);

            if let Some(event_id) = self.event_id.filter(|id| !id.is_empty()) {
                query.append_pair(PARAM_EVENT_ID, event_id);
            }

            if let Some(user_data) = self.user_data {
                for (field, value) in user_data.iter() {
                    if value.is_empty() {
                        continue;
                    }
                    match env.digest(&normalize(field, value)) {
                        Some(hash) => {
                            query.append_pair(&user_data_param(field.key()), &hash);
                            hashed_fields += 1;
                        }
                        None => {
                            debug!(field = field.key(), "hashing unavailable, omitting field");
                        }
                    }
                }
            }

            if let Some(custom_data) = self.custom_data {
                for (key, value) in custom_data.iter() {
                    if let Some(formatted) = value.to_query_value() {
                        query.append_pair(&custom_data_param(key), &formatted);
                        custom_fields += 1;
                    }
                }
            }
        }

        debug!(
            event = %self.event_name,
            hashed_fields,
            custom_fields,
            "built tracking request"
        );

        TrackingRequest {
            event_name: self.event_name.to_string(),
            url,
        }
    }
}
