// HTTP request handlers
use crate::application::netlogo_session::INITIAL_CO2_PPM;
use crate::domain::netlogo::{BridgeError, ControlAction};
use crate::domain::reference::{paris_goal_co2_ppm, PARIS_GOAL_WARMING_C};
use crate::infrastructure::command_stream::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, error_reply, json_reply};
use crate::presentation::app_state::AppState;
use crate::presentation::dto::{
    chart_to_dto, reading_to_dto, reference_to_dto, CommandsSentDto, ModelCatalogDto,
    ReferenceLevelsDto,
};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct Co2Query {
    pub co2: Option<f64>,
}

impl Co2Query {
    fn level(&self) -> Result<f64, &'static str> {
        let co2 = self.co2.unwrap_or(INITIAL_CO2_PPM);
        if co2.is_finite() {
            Ok(co2)
        } else {
            Err("co2 must be a finite number of ppm")
        }
    }
}

#[derive(Deserialize)]
pub struct SetCo2Request {
    pub co2: f64,
}

#[derive(Deserialize)]
pub struct SelectModelRequest {
    pub url: String,
}

#[derive(Deserialize)]
pub struct FrameErrorRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct UploadRequest {
    pub file_name: String,
}

fn bridge_error_status(error: &BridgeError) -> StatusCode {
    match error {
        BridgeError::UnknownAction(_) => StatusCode::NOT_FOUND,
        BridgeError::FrameNotLoaded => StatusCode::CONFLICT,
        BridgeError::InvalidModelFile => StatusCode::BAD_REQUEST,
        BridgeError::HostingRequired => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

async fn bridge_error_reply(error: BridgeError) -> Response<Body> {
    error_reply(bridge_error_status(&error), &error.to_string()).await
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Projected temperature and severity for a CO₂ level
pub async fn get_temperature(
    Query(query): Query<Co2Query>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let co2 = match query.level() {
        Ok(co2) => co2,
        Err(message) => return error_reply(StatusCode::BAD_REQUEST, message).await,
    };

    let service = &state.simulation_service;
    let dto = reading_to_dto(&service.reading(co2), service.fraction_digits());
    json_reply(StatusCode::OK, &dto, accepts_brotli(&headers)).await
}

/// Sampled temperature curve with the live level highlighted
pub async fn get_chart(
    Query(query): Query<Co2Query>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let co2 = match query.level() {
        Ok(co2) => co2,
        Err(message) => return error_reply(StatusCode::BAD_REQUEST, message).await,
    };

    let dto = chart_to_dto(state.simulation_service.chart(co2));
    json_reply(StatusCode::OK, &dto, accepts_brotli(&headers)).await
}

pub async fn get_reference_levels(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let service = &state.simulation_service;
    let digits = service.fraction_digits();
    let dto = ReferenceLevelsDto {
        levels: service
            .reference_levels()
            .into_iter()
            .map(|level| reference_to_dto(level, digits))
            .collect(),
        paris_goal_c: PARIS_GOAL_WARMING_C,
        paris_goal_co2_ppm: paris_goal_co2_ppm(service.model()),
    };
    json_reply(StatusCode::OK, &dto, accepts_brotli(&headers)).await
}

pub async fn get_session(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let snapshot = state.netlogo_session.snapshot().await;
    json_reply(StatusCode::OK, &snapshot, accepts_brotli(&headers)).await
}

/// Slider moved: record the level and forward it to the model frame
pub async fn set_co2(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetCo2Request>,
) -> Response<Body> {
    if !request.co2.is_finite() {
        return error_reply(StatusCode::BAD_REQUEST, "co2 must be a finite number of ppm").await;
    }

    let commands_sent = state.netlogo_session.set_co2(request.co2).await;
    json_reply(StatusCode::OK, &CommandsSentDto { commands_sent }, accepts_brotli(&headers)).await
}

pub async fn list_models(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let dto = ModelCatalogDto {
        models: state.netlogo_session.catalog(),
    };
    json_reply(StatusCode::OK, &dto, accepts_brotli(&headers)).await
}

pub async fn select_model(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectModelRequest>,
) -> Response<Body> {
    let url = request.url.trim();
    if url.is_empty() {
        return error_reply(StatusCode::BAD_REQUEST, "model url must not be empty").await;
    }

    let snapshot = state.netlogo_session.select_model(url.to_string()).await;
    json_reply(StatusCode::OK, &snapshot, accepts_brotli(&headers)).await
}

pub async fn frame_loaded(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let commands_sent = state.netlogo_session.frame_loaded().await;
    json_reply(StatusCode::OK, &CommandsSentDto { commands_sent }, accepts_brotli(&headers)).await
}

pub async fn frame_error(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<FrameErrorRequest>,
) -> Response<Body> {
    let snapshot = state.netlogo_session.frame_failed(request.reason).await;
    json_reply(StatusCode::OK, &snapshot, accepts_brotli(&headers)).await
}

/// Play, pause, reset or setup the embedded model
pub async fn control(
    Path(action): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response<Body> {
    let action = match action.parse::<ControlAction>() {
        Ok(action) => action,
        Err(e) => return bridge_error_reply(e).await,
    };

    match state.netlogo_session.control(action).await {
        Ok(snapshot) => json_reply(StatusCode::OK, &snapshot, accepts_brotli(&headers)).await,
        Err(e) => bridge_error_reply(e).await,
    }
}

pub async fn upload_model(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadRequest>,
) -> Response<Body> {
    match state.netlogo_session.check_upload(&request.file_name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => bridge_error_reply(e).await,
    }
}

/// Long-lived stream of commands for the page hosting the model frame
pub async fn stream_commands(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_from_receiver(state.command_sink.subscribe())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::netlogo_session::NetLogoSession;
    use crate::application::simulation_service::SimulationService;
    use crate::domain::chart::SampleDomain;
    use crate::domain::temperature::TemperatureModel;
    use crate::infrastructure::broadcast_sink::BroadcastSink;
    use crate::infrastructure::config::{ChartSettings, NetLogoSettings};

    fn state() -> Arc<AppState> {
        let sink = BroadcastSink::new();
        let netlogo = NetLogoSettings::default();
        Arc::new(AppState {
            simulation_service: SimulationService::new(
                TemperatureModel::default(),
                SampleDomain::default(),
                ChartSettings::default(),
            ),
            netlogo_session: NetLogoSession::new(
                Arc::new(sink.clone()),
                netlogo.co2_variables.clone(),
                netlogo.catalog(),
            ),
            command_sink: sink,
        })
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_temperature_defaults_to_current_level() {
        let response = get_temperature(
            Query(Co2Query { co2: None }),
            HeaderMap::new(),
            State(state()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["co2_ppm"], 420.0);
        assert_eq!(json["display"], "15.40°C");
        assert_eq!(json["severity"]["label"], "Moderate");
    }

    #[tokio::test]
    async fn test_temperature_rejects_non_finite_level() {
        let response = get_temperature(
            Query(Co2Query { co2: Some(f64::NAN) }),
            HeaderMap::new(),
            State(state()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chart_marks_rounded_sample() {
        let response = get_chart(
            Query(Co2Query { co2: Some(425.0) }),
            HeaderMap::new(),
            State(state()),
        )
        .await;
        let json = body_json(response).await;
        let samples = json["samples"].as_array().unwrap();
        assert_eq!(samples.len(), 23);

        let current: Vec<_> = samples.iter().filter(|s| s["current"] == true).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0]["co2_ppm"], 430.0);
    }

    #[tokio::test]
    async fn test_reference_levels() {
        let json = body_json(get_reference_levels(HeaderMap::new(), State(state())).await).await;
        assert_eq!(json["levels"].as_array().unwrap().len(), 3);
        assert_eq!(json["paris_goal_c"], 1.5);
    }

    #[tokio::test]
    async fn test_set_co2_before_and_after_frame_load() {
        let state = state();
        let mut rx = state.command_sink.subscribe();

        let json = body_json(set_co2(HeaderMap::new(), State(state.clone()), Json(SetCo2Request { co2: 450.0 })).await).await;
        assert_eq!(json["commands_sent"], 0);

        let json = body_json(frame_loaded(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(json["commands_sent"], 6);
        assert_eq!(rx.recv().await.unwrap().command, "set co2-level 450");

        let json = body_json(get_session(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(json["frame"]["state"], "loaded");
        assert_eq!(json["co2_ppm"], 450.0);
    }

    #[tokio::test]
    async fn test_control_statuses() {
        let state = state();

        let response = control(Path("play".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = control(Path("rewind".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        frame_loaded(HeaderMap::new(), State(state.clone())).await;
        let json = body_json(control(Path("play".to_string()), HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(json["running"], true);
    }

    #[tokio::test]
    async fn test_frame_error_and_reselect() {
        let state = state();
        let json = body_json(
            frame_error(
                HeaderMap::new(),
                State(state.clone()),
                Json(FrameErrorRequest { reason: None }),
            )
            .await,
        )
        .await;
        assert_eq!(json["frame"]["state"], "failed");

        let response = select_model(
            HeaderMap::new(),
            State(state.clone()),
            Json(SelectModelRequest { url: "  ".to_string() }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(
            select_model(
                HeaderMap::new(),
                State(state.clone()),
                Json(SelectModelRequest {
                    url: "https://www.netlogoweb.org/launch#model.nlogo".to_string(),
                }),
            )
            .await,
        )
        .await;
        assert_eq!(json["frame"]["state"], "loading");
    }

    #[tokio::test]
    async fn test_upload_checks() {
        let response = upload_model(
            State(state()),
            Json(UploadRequest { file_name: "notes.txt".to_string() }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = upload_model(
            State(state()),
            Json(UploadRequest { file_name: "mine.nlogo".to_string() }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("NetLogo Web hosting"));
    }

    #[tokio::test]
    async fn test_session_endpoints_honour_brotli() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::ACCEPT_ENCODING,
            axum::http::HeaderValue::from_static("br"),
        );
        let state = state();

        let responses = vec![
            get_session(headers.clone(), State(state.clone())).await,
            list_models(headers.clone(), State(state.clone())).await,
            frame_loaded(headers.clone(), State(state.clone())).await,
            set_co2(
                headers.clone(),
                State(state.clone()),
                Json(SetCo2Request { co2: 300.0 }),
            )
            .await,
            control(Path("pause".to_string()), headers.clone(), State(state.clone())).await,
            frame_error(
                headers.clone(),
                State(state.clone()),
                Json(FrameErrorRequest { reason: None }),
            )
            .await,
            select_model(
                headers.clone(),
                State(state.clone()),
                Json(SelectModelRequest {
                    url: "https://www.netlogoweb.org/launch#model.nlogo".to_string(),
                }),
            )
            .await,
        ];

        for response in responses {
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()[axum::http::header::CONTENT_ENCODING],
                "br"
            );
        }
    }

    #[tokio::test]
    async fn test_models_catalog() {
        let json = body_json(list_models(HeaderMap::new(), State(state())).await).await;
        assert_eq!(json["models"][0]["name"], "Climate Change");
    }
}
