//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use chrono::{Local, Utc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::board::DEFAULT_FORECAST_DAYS;
use crate::domain::{Direction, DomainError, StationCode};
use crate::external::{ExternalData, FetchError};
use crate::openmeteo::MAX_FORECAST_DAYS;
use crate::registry::{DEFAULT_CITY, DEFAULT_TUBE_STATION};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// Paths not matched by an API route are served from `static_dir`.
pub fn create_router<S: ExternalData>(state: AppState<S>, static_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/bart", get(bart_arrivals::<S>))
        .route("/api/tfl", get(tube_arrivals::<S>))
        .route("/api/tfl-status", get(tube_status::<S>))
        .route("/api/weather", get(weather_forecast::<S>))
        .route("/api/reset", get(reset::<S>).post(reset::<S>))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse `direction`; absent or `all` means no filter.
fn parse_direction(raw: Option<&str>) -> Result<Option<Direction>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(d) if d.eq_ignore_ascii_case("all") => Ok(None),
        Some(d) => d.parse().map(Some).map_err(|()| AppError::BadRequest {
            message: format!("Invalid direction: {d}"),
        }),
    }
}

/// Projected BART arrivals in ETD shape.
async fn bart_arrivals<S: ExternalData>(
    State(state): State<AppState<S>>,
    Query(req): Query<BartQuery>,
) -> Result<Json<BartResponse>, AppError> {
    let board = &state.board;
    let default = board.registry().default_station().code;

    // Malformed codes get the same treatment as unknown ones
    let code = match req.station.as_deref() {
        None => default,
        Some(raw) => StationCode::parse_normalized(raw).unwrap_or_else(|e| {
            warn!(station = raw, error = %e, "invalid station code, using default");
            default
        }),
    };
    let direction = parse_direction(req.direction.as_deref())?;

    let arrivals = board
        .get_arrivals_toward(&code, direction, Utc::now())
        .await?;

    Ok(Json(BartResponse::from_arrivals(&arrivals, Local::now())))
}

/// Live tube arrivals at a stop point.
async fn tube_arrivals<S: ExternalData>(
    State(state): State<AppState<S>>,
    Query(req): Query<TflQuery>,
) -> Result<Json<TubeResponse>, AppError> {
    let stop_id = req.station.as_deref().unwrap_or(DEFAULT_TUBE_STATION);
    let tube = state.board.tube_board(stop_id, Utc::now()).await?;
    Ok(Json(TubeResponse::from_board(&tube)))
}

/// Status of every tube line.
async fn tube_status<S: ExternalData>(
    State(state): State<AppState<S>>,
) -> Result<Json<LineStatusResponse>, AppError> {
    let lines = state.board.line_status().await?;
    Ok(Json(LineStatusResponse {
        lines: lines.iter().map(LineStatusResult::from_status).collect(),
    }))
}

/// City forecast. Always answers, falling back to a static outlook.
async fn weather_forecast<S: ExternalData>(
    State(state): State<AppState<S>>,
    Query(req): Query<WeatherQuery>,
) -> Json<ForecastResponse> {
    let city = req.city.as_deref().unwrap_or(DEFAULT_CITY);
    let days = req.days.map_or(DEFAULT_FORECAST_DAYS, |d| {
        // In range after the clamp
        d.clamp(1, i64::from(MAX_FORECAST_DAYS)) as u8
    });

    let forecast = state.board.forecast(city, days, Utc::now()).await;
    Json(ForecastResponse::from_city(&forecast))
}

/// Regenerate the schedule and clear cached weather.
async fn reset<S: ExternalData>(State(state): State<AppState<S>>) -> Json<ResetResponse> {
    state.board.reset(Utc::now()).await;
    Json(ResetResponse {
        status: "Schedule and weather cache reset successfully",
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
    /// An upstream data source failed and there is no fallback.
    Upstream { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownStationCode(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ArrivalBoard, BoardConfig};
    use crate::domain::LineStatus;
    use crate::external::mock::{MockExternalData, arrival};
    use crate::registry::StationRegistry;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router_with(source: MockExternalData, static_dir: &Path) -> Router {
        let registry = StationRegistry::bart().unwrap();
        let board = ArrivalBoard::new(registry, source, &BoardConfig::default().with_seed(7));
        create_router(AppState::new(board), static_dir)
    }

    fn router(source: MockExternalData) -> Router {
        router_with(source, Path::new("/nonexistent-static-dir"))
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(app, Method::GET, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(parse_direction(None).unwrap(), None);
        assert_eq!(parse_direction(Some("ALL")).unwrap(), None);
        assert_eq!(
            parse_direction(Some("north")).unwrap(),
            Some(Direction::North)
        );
        assert!(parse_direction(Some("up")).is_err());
    }

    #[test]
    fn error_status_codes() {
        let cases = [
            (AppError::BadRequest { message: "x".into() }, StatusCode::BAD_REQUEST),
            (AppError::NotFound { message: "x".into() }, StatusCode::NOT_FOUND),
            (AppError::Internal { message: "x".into() }, StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Upstream { message: "x".into() }, StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn health_check() {
        let (status, body) = send(router(MockExternalData::new()), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn bart_default_station() {
        let (status, json) = get_json(router(MockExternalData::new()), "/api/bart").await;

        assert_eq!(status, StatusCode::OK);
        let station = &json["root"]["station"][0];
        assert_eq!(station["abbr"], "12TH");
        assert_eq!(
            json["root"]["uri"]["#cdata-section"],
            "http://api.bart.gov/api/etd.aspx?cmd=etd&orig=12TH"
        );

        let etds = station["etd"].as_array().unwrap();
        assert!(!etds.is_empty());
        for etd in etds {
            assert_eq!(etd["limited"], "0");
            assert_eq!(etd["weather"]["temp"], 14.5);
            assert_eq!(etd["weather"]["aqiLevel"], "Good");
            let estimates = etd["estimate"].as_array().unwrap();
            assert!(!estimates.is_empty());
            for estimate in estimates {
                assert!(estimate["minutes"].is_string());
                assert_eq!(estimate["bikeflag"], "1");
            }
        }
    }

    #[tokio::test]
    async fn bart_station_code_normalized() {
        let (_, json) = get_json(router(MockExternalData::new()), "/api/bart?station=embr").await;
        assert_eq!(json["root"]["station"][0]["abbr"], "EMBR");
        assert_eq!(json["root"]["station"][0]["name"], "Embarcadero");
    }

    #[tokio::test]
    async fn bart_unknown_or_invalid_station_uses_default() {
        for uri in ["/api/bart?station=ZZZZ", "/api/bart?station=not-a-code"] {
            let (status, json) = get_json(router(MockExternalData::new()), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["root"]["station"][0]["abbr"], "12TH");
        }
    }

    #[tokio::test]
    async fn bart_direction_filter() {
        let (_, json) = get_json(
            router(MockExternalData::new()),
            "/api/bart?station=12TH&direction=North",
        )
        .await;

        let etds = json["root"]["station"][0]["etd"].as_array().unwrap();
        assert!(!etds.is_empty());
        for etd in etds {
            for estimate in etd["estimate"].as_array().unwrap() {
                assert_eq!(estimate["direction"], "North");
            }
        }
    }

    #[tokio::test]
    async fn bart_bad_direction() {
        let (status, json) = get_json(
            router(MockExternalData::new()),
            "/api/bart?direction=sideways",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid direction: sideways");
    }

    #[tokio::test]
    async fn bart_weather_failure_uses_fallback() {
        let (status, json) = get_json(router(MockExternalData::failing()), "/api/bart").await;

        assert_eq!(status, StatusCode::OK);
        for etd in json["root"]["station"][0]["etd"].as_array().unwrap() {
            assert_eq!(etd["weather"]["temp"], 20.0);
            assert_eq!(etd["weather"]["aqi"], 50);
        }
    }

    #[tokio::test]
    async fn tube_arrivals_grouped() {
        let source = MockExternalData::new().with_arrivals(vec![
            arrival("Victoria", "Brixton", 400),
            arrival("Victoria", "Brixton", 10),
        ]);

        let (status, json) = get_json(router(source), "/api/tfl?station=940GZZLUVIC").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["station"]["name"], "Victoria");
        assert_eq!(json["station"]["facilities"]["toilets"], true);

        let trains = json["trains"].as_array().unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0]["color"], "#0098D4");
        assert_eq!(trains[0]["estimates"][0]["minutes"], "Arriving");
        assert_eq!(trains[0]["estimates"][1]["minutes"], "6");
        assert!(trains[0]["estimates"][0]["vehicleId"].is_string());
        assert_eq!(json["weather"]["condition"], "Overcast");
    }

    #[tokio::test]
    async fn tube_unlisted_stop_answers_for_itself() {
        let (status, json) = get_json(
            router(MockExternalData::new()),
            "/api/tfl?station=940GZZLUBXN",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["station"]["id"], "940GZZLUBXN");
        assert_eq!(json["station"]["name"], "Unknown");
        assert_eq!(json["station"]["facilities"]["stepFree"], false);
    }

    #[tokio::test]
    async fn tube_upstream_failure_is_bad_gateway() {
        let (status, json) = get_json(router(MockExternalData::failing()), "/api/tfl").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "live arrivals request timed out");
    }

    #[tokio::test]
    async fn tube_line_status() {
        let source = MockExternalData::new().with_lines(vec![LineStatus {
            id: "northern".into(),
            name: "Northern".into(),
            severity: 9,
            status: "Minor Delays".into(),
        }]);

        let (status, json) = get_json(router(source), "/api/tfl-status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["lines"][0]["id"], "northern");
        assert_eq!(json["lines"][0]["color"], "#000000");
        assert_eq!(json["lines"][0]["severity"], 9);
    }

    #[tokio::test]
    async fn tube_line_status_failure() {
        let (status, _) = get_json(router(MockExternalData::failing()), "/api/tfl-status").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn weather_days_clamped() {
        let (status, json) = get_json(
            router(MockExternalData::new()),
            "/api/weather?city=London&days=30",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["city"], "London");
        assert_eq!(json["forecast"].as_array().unwrap().len(), 16);
        assert_eq!(json["forecast"][0]["date"], "2024-03-15");
        assert_eq!(json["forecast"][0]["precipProb"], 70);

        let (_, json) = get_json(router(MockExternalData::new()), "/api/weather?days=-4").await;
        assert_eq!(json["city"], "San Francisco");
        assert_eq!(json["forecast"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn weather_failure_uses_fallback() {
        let (status, json) = get_json(router(MockExternalData::failing()), "/api/weather").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["forecast"].as_array().unwrap().len(), 7);
        assert_eq!(json["forecast"][0]["tempMax"], 22.0);
        assert_eq!(json["current"]["pressure"], 1013);
    }

    #[tokio::test]
    async fn reset_accepts_get_and_post() {
        for method in [Method::GET, Method::POST] {
            let (status, body) = send(router(MockExternalData::new()), method, "/api/reset").await;
            let json: Value = serde_json::from_slice(&body).unwrap();

            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["status"], "Schedule and weather cache reset successfully");
        }
    }

    #[tokio::test]
    async fn static_files_served_for_unmatched_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>board</h1>").unwrap();

        let (status, body) = send(
            router_with(MockExternalData::new(), dir.path()),
            Method::GET,
            "/index.html",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>board</h1>");

        let (status, _) = send(
            router_with(MockExternalData::new(), dir.path()),
            Method::GET,
            "/missing.js",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();

        let response = router(MockExternalData::new()).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
