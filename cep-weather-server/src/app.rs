//! Router and request handler for the temperature-by-CEP endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use cep_weather_core::{PostalLookup, Temperatures, WeatherLookup};

use crate::error::ApiError;

/// Shared handler dependencies.
///
/// The upstream clients sit behind trait objects so tests can substitute
/// doubles for the real HTTP clients.
#[derive(Debug, Clone)]
pub struct AppState {
    pub postal: Arc<dyn PostalLookup>,
    pub weather: Arc<dyn WeatherLookup>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(missing_cep))
        .route("/{cep}", get(temperature_by_cep))
        .with_state(state)
}

/// An empty path segment never matches `/{cep}`; treat it as an empty
/// postal code.
async fn missing_cep() -> ApiError {
    ApiError::InvalidZipcode
}

/// validate -> postal lookup -> weather lookup -> convert, short-circuiting
/// on the first failure. Dropping the connection cancels any in-flight
/// upstream call along with this future.
async fn temperature_by_cep(
    State(state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<Json<Temperatures>, ApiError> {
    // Byte length only; numeric content is not checked.
    if cep.len() != 8 {
        return Err(ApiError::InvalidZipcode);
    }

    let address = state.postal.lookup(&cep).await.map_err(|err| {
        tracing::warn!(%cep, error = %err, "postal lookup failed");
        ApiError::ZipcodeNotFound
    })?;

    let forecast = state
        .weather
        .current(&address.latitude, &address.longitude)
        .await
        .map_err(|err| {
            tracing::warn!(%cep, error = %err, "weather lookup failed");
            ApiError::WeatherNotFound
        })?;

    Ok(Json(Temperatures::from_celsius(
        forecast.current.temperature_2m,
    )))
}
