//! Resource payloads
//!
//! Pass-through structs for the `data` field of each resource envelope.
//! Missing keys fall back to defaults; dates stay as the strings the
//! service sends.

use serde::{Deserialize, Serialize};

/// Verse, hadith, and prayer of the day with their sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyContent {
    pub id: i64,
    /// 1 to 366.
    pub day_of_year: u16,
    pub verse: String,
    pub verse_source: String,
    pub hadith: String,
    pub hadith_source: String,
    pub pray: String,
    pub pray_source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Country {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// A state or province.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct City {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Qibla and naming details for one city. The service sends every field as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CityDetail {
    pub id: String,
    pub name: String,
    pub code: String,
    pub geographic_qibla_angle: String,
    pub distance_to_kaaba: String,
    pub qibla_angle: String,
    pub city: String,
    pub city_en: String,
    pub country: String,
    pub country_en: String,
}

/// Prayer times and calendar data for one day in one city.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrayerTime {
    #[serde(alias = "shapeMoonURL")]
    pub shape_moon_url: String,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    pub astronomical_sunset: String,
    pub astronomical_sunrise: String,
    pub hijri_date_short: String,
    pub hijri_date_long: String,
    /// ISO 8601 timestamp as sent.
    #[serde(rename = "hijriDateLongIso8601")]
    pub hijri_date: String,
    pub qibla_time: String,
    pub gregorian_date_short: String,
    pub gregorian_date_long: String,
    /// ISO 8601 timestamp as sent.
    #[serde(rename = "gregorianDateLongIso8601")]
    pub gregorian_date: String,
    /// Offset from GMT in hours, possibly fractional.
    pub greenwich_mean_time_zone: f32,
}
