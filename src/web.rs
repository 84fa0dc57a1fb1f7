use crate::service::ScheduleService;
use crate::utils::export::{export_filename, to_xlsx, XLSX_MIME};
use crate::utils::presenter::{Presenter, ScheduleRow, COLUMNS};
use askama::Template;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Template)]
#[template(path = "schedule.html")]
struct ScheduleTemplate {
    title: String,
    columns: [&'static str; 5],
    rows: Vec<ScheduleRow>,
    time_zone: String,
    odds_available: bool,
    skipped: usize,
    error: Option<String>,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ScheduleService>,
    pub presenter: Presenter,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new("static"))
        .route("/", get(schedule_page))
        .route("/export", get(export_schedule))
        .with_state(state)
}

async fn schedule_page(State(state): State<AppState>) -> Response {
    let time_zone = state.presenter.time_zone().name().to_string();

    match state.service.refresh().await {
        Ok(data) => {
            let template = ScheduleTemplate {
                title: data.title(),
                columns: COLUMNS,
                rows: state.presenter.rows(&data.fixtures),
                time_zone,
                odds_available: data.odds_available,
                skipped: data.skipped,
                error: None,
            };
            HtmlTemplate(template).into_response()
        }
        Err(e) => {
            tracing::error!("Schedule refresh failed: {}", e);
            let template = ScheduleTemplate {
                title: "Schedule".to_string(),
                columns: COLUMNS,
                rows: Vec::new(),
                time_zone,
                odds_available: false,
                skipped: 0,
                error: Some(format!("Error fetching schedule data: {}", e)),
            };
            (StatusCode::BAD_GATEWAY, HtmlTemplate(template)).into_response()
        }
    }
}

async fn export_schedule(State(state): State<AppState>) -> Response {
    let data = match state.service.refresh().await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Schedule refresh failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                format!("Error fetching schedule data: {}", e),
            )
                .into_response();
        }
    };

    let rows = state.presenter.rows(&data.fixtures);
    let bytes = match to_xlsx(&rows) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Spreadsheet export failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build spreadsheet: {}", e),
            )
                .into_response();
        }
    };

    let nickname = state
        .service
        .directory()
        .nickname(&data.team_code)
        .unwrap_or_else(|| data.team_code.to_lowercase());
    let filename = export_filename(&nickname, data.season);

    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
