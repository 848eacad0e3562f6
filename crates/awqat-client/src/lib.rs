//! Diyanet Awqat Salah API client
//!
//! `Client` fetches places, daily content, and prayer times. Every request
//! goes through `AuthenticatedClient`, which asks a `provider::Provider`
//! for the bearer token first. `Client::new` wires in an
//! `awqat_auth::TokenSource` built from the configured credentials.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{Client, PrayerPeriod};
pub use error::{Error, Result};
pub use models::{City, CityDetail, Country, DailyContent, PrayerTime, State};
pub use transport::AuthenticatedClient;
