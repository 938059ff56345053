// Axum API server: configuration, shared state, router, and handlers.
//
// Four JSON endpoints over the domain modules (predict, weather, suitability,
// regions), plus a static home page and a health check.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::data::load_training_data;
use crate::error::AppError;
use crate::estimator::YieldEstimator;
use crate::regions::RegionStore;
use crate::suitability;
use crate::weather::{LocationQuery, WeatherClient, WeatherReport};

// ============================================================================
// Configuration
// ============================================================================

/// Runtime configuration, read from the environment by the binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub training_data: String,
    pub regions_db: String,
    pub weather_base_url: String,
    pub weather_api_key: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            training_data: std::env::var("TRAINING_DATA")
                .unwrap_or_else(|_| "crop_data.csv".to_string()),
            regions_db: std::env::var("REGIONS_DB")
                .unwrap_or_else(|_| "crop_data.db".to_string()),
            weather_base_url: std::env::var("WEATHER_BASE_URL")
                .unwrap_or_else(|_| crate::weather::DEFAULT_BASE_URL.to_string()),
            weather_api_key: std::env::var("OPENWEATHER_API_KEY").unwrap_or_default(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Shared state injected into every handler.
///
/// The estimator is fitted once here and never mutated afterwards, so it is
/// shared read-only behind an `Arc` with no locking.
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<YieldEstimator>,
    pub weather: WeatherClient,
    pub regions: RegionStore,
}

impl AppState {
    pub async fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading training data from {}...", config.training_data);
        let records = load_training_data(&config.training_data)?;

        tracing::info!("Fitting yield estimator on {} records...", records.len());
        let estimator = Arc::new(YieldEstimator::fit(&records)?);

        tracing::info!("Opening region store at {}...", config.regions_db);
        let regions = RegionStore::connect(&config.regions_db).await?;

        let weather = WeatherClient::new(&config.weather_base_url, &config.weather_api_key);

        Ok(Self {
            estimator,
            weather,
            regions,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/weather", get(get_weather))
        .route("/predict", post(predict))
        .route("/suitability", post(get_suitability))
        .route("/regions", post(find_regions))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn home() -> Html<&'static str> {
    Html(
        "Welcome to the Crop Yield Prediction and Suitability API!<br>\
         Endpoints:<br>\
         <code>/predict</code> - Predict crop yield<br>\
         <code>/weather</code> - Get weather data<br>\
         <code>/suitability</code> - Check crop suitability<br>\
         <code>/regions</code> - Find regions for optimal crop growth<br>",
    )
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<WeatherReport>, AppError> {
    let Query(location) = query?;
    let report = state.weather.fetch(&location).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
struct PredictRequest {
    rainfall: f64,
    temperature: f64,
    soil_ph: f64,
    fertilizer_use: f64,
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = body?;

    let predicted_yield = state
        .estimator
        .predict(
            req.rainfall,
            req.temperature,
            req.soil_ph,
            req.fertilizer_use,
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(serde_json::json!({ "predicted_yield": predicted_yield })))
}

#[derive(Debug, Deserialize)]
struct SuitabilityRequest {
    crop: String,
    rainfall: f64,
    temperature: f64,
    soil_ph: f64,
}

async fn get_suitability(
    body: Result<Json<SuitabilityRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = body?;

    let range = suitability::lookup(&req.crop)
        .ok_or_else(|| AppError::UnknownCrop(req.crop.to_lowercase()))?;
    let message = range.verdict(req.temperature, req.soil_ph, req.rainfall);

    Ok(Json(serde_json::json!({ "message": message })))
}

#[derive(Debug, Deserialize)]
struct RegionRequest {
    temperature: f64,
    soil_ph: f64,
    rainfall: f64,
}

async fn find_regions(
    State(state): State<AppState>,
    body: Result<Json<RegionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = body?;

    let matches = state
        .regions
        .find_matching(req.temperature, req.soil_ph, req.rainfall)
        .await?;

    // Placeholder object instead of an empty list when nothing matches
    if matches.is_empty() {
        return Ok(Json(serde_json::json!([
            { "message": "No suitable regions found" }
        ])));
    }

    let body = serde_json::to_value(&matches).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}
