//! Pixel tracker implementation.

use crate::config::{Config, PixelTrackerBuilder};
use crate::environment::Environment;
use crate::request::{RequestBuilder, TrackingRequest};
use crate::types::{CustomData, CustomValue, StandardEvent, UserData, UserDataField, PAGE_VIEW};
use crate::Error;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

/// Pixel tracker bound to one pixel id.
///
/// Every tracking call builds a fresh beacon URL, hashes the user data that
/// goes into it and hands it to the environment without waiting for the
/// remote side.
///
/// # Example
///
/// ```rust,no_run
/// use pixel_beacon::{PixelTracker, UserData};
///
/// #[tokio::main]
/// async fn main() -> Result<(), pixel_beacon::Error> {
///     let tracker = PixelTracker::builder("123").build()?;
///
///     tracker
///         .track_purchase()
///         .custom("value", 99.9)
///         .custom("currency", "BRL")
///         .user_data(UserData::new().email("x@y.com"))
///         .event_id("order-1001")
///         .send()?;
///
///     tracker.track_page_view()?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct PixelTracker {
    config: Config,
    environment: Arc<dyn Environment>,
}

impl PixelTracker {
    /// Create a new builder with the given pixel id.
    pub fn builder(pixel_id: impl Into<String>) -> PixelTrackerBuilder {
        PixelTrackerBuilder::new(pixel_id)
    }

    /// Get the tracker configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pixel_id(&self) -> &str {
        self.config.pixel_id()
    }

    /// Track a standard event.
    pub fn track(&self, event: StandardEvent) -> PendingEvent<'_> {
        PendingEvent::new(self, Cow::Borrowed(event.as_str()))
    }

    /// Track an event outside the standard catalog.
    pub fn track_custom(&self, event_name: impl Into<String>) -> PendingEvent<'_> {
        PendingEvent::new(self, Cow::Owned(event_name.into()))
    }

    /// Track a page view. Page views carry no data.
    pub fn track_page_view(&self) -> Result<(), Error> {
        PendingEvent::new(self, Cow::Borrowed(PAGE_VIEW)).send()
    }

    standard_event_methods!(PendingEvent<'_>);
}

impl PixelTrackerBuilder {
    /// Build the pixel tracker.
    pub fn build(self) -> Result<PixelTracker, Error> {
        let config = self.build_config()?;
        let environment = self.build_environment()?;

        info!(pixel_id = %config.pixel_id(), endpoint = %config.endpoint(), "pixel tracker ready");

        Ok(PixelTracker {
            config,
            environment,
        })
    }
}

/// An event being prepared for sending.
#[derive(Debug)]
#[must_use = "events are only tracked once `send` is called"]
pub struct PendingEvent<'a> {
    tracker: &'a PixelTracker,
    event_name: Cow<'static, str>,
    custom_data: Option<CustomData>,
    user_data: Option<UserData>,
    event_id: Option<String>,
}

impl<'a> PendingEvent<'a> {
    fn new(tracker: &'a PixelTracker, event_name: Cow<'static, str>) -> Self {
        Self {
            tracker,
            event_name,
            custom_data: None,
            user_data: None,
            event_id: None,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Add a custom data field.
    pub fn custom(mut self, key: impl Into<String>, value: impl Into<CustomValue>) -> Self {
        self.custom_data
            .get_or_insert_with(CustomData::new)
            .set(key, value);
        self
    }

    /// Add custom data fields; later fields win.
    pub fn custom_data(mut self, data: CustomData) -> Self {
        match &mut self.custom_data {
            Some(existing) => existing.extend(data),
            None => self.custom_data = Some(data),
        }
        self
    }

    /// Add a user data field. Hashed before sending.
    pub fn user(mut self, field: UserDataField, value: impl Into<String>) -> Self {
        self.user_data
            .get_or_insert_with(UserData::new)
            .set(field, value);
        self
    }

    /// Add user data fields; later fields win.
    pub fn user_data(mut self, data: UserData) -> Self {
        match &mut self.user_data {
            Some(existing) => existing.extend(data),
            None => self.user_data = Some(data),
        }
        self
    }

    /// Set the deduplication id.
    pub fn event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    /// Build the beacon without sending it.
    pub fn build_request(&self) -> Result<TrackingRequest, Error> {
        if self.event_name.is_empty() {
            return Err(Error::InvalidEvent("event name cannot be empty".into()));
        }

        let config = &self.tracker.config;
        let request = RequestBuilder::new(config.endpoint(), config.pixel_id(), &self.event_name)
            .event_id(self.event_id.as_deref())
            .user_data(self.user_data.as_ref())
            .custom_data(self.custom_data.as_ref())
            .build(self.tracker.environment.as_ref());

        Ok(request)
    }

    /// Send the event. Returns once the beacon is handed off.
    pub fn send(self) -> Result<(), Error> {
        let request = self.build_request()?;
        debug!(event = %request.event_name(), "dispatching event");
        self.tracker.environment.deliver(request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::sha256_hex;

    fn offline_tracker() -> PixelTracker {
        PixelTracker::builder("123").offline().build().unwrap()
    }

    fn live_tracker() -> PixelTracker {
        PixelTracker::builder("123").build().unwrap()
    }

    fn param(request: &TrackingRequest, key: &str) -> Option<String> {
        request
            .url()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_standard_methods_use_catalog_names() {
        let tracker = offline_tracker();

        assert_eq!(tracker.track_purchase().event_name(), "Purchase");
        assert_eq!(tracker.track_add_to_cart().event_name(), "AddToCart");
        assert_eq!(
            tracker.track_complete_registration().event_name(),
            "CompleteRegistration"
        );
        assert_eq!(tracker.track_view_content().event_name(), "ViewContent");
    }

    #[test]
    fn test_every_standard_event_builds() {
        let tracker = offline_tracker();

        for event in StandardEvent::ALL {
            let request = tracker.track(event).build_request().unwrap();
            assert_eq!(param(&request, "ev").unwrap(), event.as_str());
            assert_eq!(param(&request, "id").unwrap(), "123");
        }
    }

    #[test]
    fn test_custom_event_name() {
        let tracker = offline_tracker();
        let request = tracker
            .track_custom("QuizCompleted")
            .custom("score", 7)
            .build_request()
            .unwrap();

        assert_eq!(param(&request, "ev").unwrap(), "QuizCompleted");
        assert_eq!(param(&request, "cd[score]").unwrap(), "7");
    }

    #[test]
    fn test_empty_custom_event_name_fails() {
        let tracker = offline_tracker();
        let result = tracker.track_custom("").send();

        assert!(matches!(result, Err(Error::InvalidEvent(_))));
    }

    #[test]
    fn test_builder_merges_fields() {
        let tracker = live_tracker();
        let request = tracker
            .track_lead()
            .custom("currency", "USD")
            .custom_data(CustomData::new().value(10.0).currency("EUR"))
            .user(UserDataField::Email, "A@B.com")
            .user_data(UserData::new().phone("+1 555 0100"))
            .event_id("lead-7")
            .build_request()
            .unwrap();

        assert_eq!(param(&request, "cd[currency]").unwrap(), "EUR");
        assert_eq!(param(&request, "cd[value]").unwrap(), "10");
        assert_eq!(param(&request, "ud[em]").unwrap(), sha256_hex("a@b.com"));
        assert_eq!(param(&request, "ud[ph]").unwrap(), sha256_hex("15550100"));
        assert_eq!(param(&request, "eid").unwrap(), "lead-7");
    }

    #[test]
    fn test_page_view_offline_is_silent() {
        let tracker = offline_tracker();
        assert!(tracker.track_page_view().is_ok());
    }

    #[test]
    fn test_send_without_runtime_is_silent() {
        let tracker = live_tracker();
        assert!(tracker.track_search().custom("search_string", "shoes").send().is_ok());
    }
}
