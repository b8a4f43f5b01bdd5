use serde::{Deserialize, Serialize};

/// Address record returned by the AwesomeAPI CEP lookup.
///
/// Latitude and longitude are strings in the upstream payload and stay
/// strings here; they are forwarded to the weather service unmodified.
/// Missing fields default to empty, matching the upstream API which omits
/// fields it has no data for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostalAddress {
    pub cep: String,
    pub address_type: String,
    pub address_name: String,
    pub address: String,
    pub state: String,
    pub district: String,
    #[serde(rename = "lat")]
    pub latitude: String,
    #[serde(rename = "lng")]
    pub longitude: String,
    pub city: String,
    #[serde(rename = "city_ibge")]
    pub ibge_code: String,
    pub ddd: String,
}

/// Units metadata for the current conditions block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentUnits {
    pub time: String,
    pub interval: String,
    pub temperature_2m: String,
}

/// Current conditions as reported by Open-Meteo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub time: String,
    pub interval: i64,
    pub temperature_2m: f64,
}

/// Forecast record returned by the Open-Meteo current-weather endpoint.
///
/// Only `current.temperature_2m` is consumed downstream; the rest is kept
/// so the full upstream payload decodes without surprises.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub current_units: CurrentUnits,
    pub current: CurrentConditions,
}

/// A temperature expressed in the three scales the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

impl Temperatures {
    /// Derive Fahrenheit and Kelvin from a Celsius reading.
    ///
    /// No rounding is applied; full f64 precision flows through to the
    /// JSON encoding.
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius * 1.8 + 32.0,
            kelvin: celsius + 273.15,
        }
    }
}
