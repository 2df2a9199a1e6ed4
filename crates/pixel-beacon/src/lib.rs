//! Conversion pixel tracking for Rust.
//!
//! Events are sent as one-way GET beacons. User data is normalized and
//! SHA-256 hashed before it is placed in the URL; custom data is sent as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixel_beacon::{CustomData, TrackerContext, UserData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pixel_beacon::Error> {
//!     let mut ctx = TrackerContext::new();
//!     ctx.init("123")?;
//!
//!     ctx.track_purchase()?
//!         .custom_data(CustomData::new().value(99.9).currency("BRL"))
//!         .user_data(UserData::new().email("x@y.com"))
//!         .send()?;
//!
//!     Ok(())
//! }
//! ```

#[macro_use]
mod types;

mod config;
mod context;
mod environment;
mod error;
mod normalize;
mod request;
mod tracker;
mod transport;

pub use config::{Config, PixelTrackerBuilder, DEFAULT_ENDPOINT};
pub use context::{TrackerContext, TrackerState};
pub use environment::{sha256_hex, Environment, LiveEnvironment, NoopEnvironment};
pub use error::Error;
pub use normalize::normalize;
pub use request::{
    custom_data_param, user_data_param, RequestBuilder, TrackingRequest, PARAM_EVENT,
    PARAM_EVENT_ID, PARAM_PIXEL_ID,
};
pub use tracker::{PendingEvent, PixelTracker};
pub use transport::BeaconTransport;
pub use types::{
    CustomData, CustomValue, Gender, NormalizationRule, StandardEvent, UserData, UserDataField,
    PAGE_VIEW,
};
