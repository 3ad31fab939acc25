//! HTTP handlers.
//!
//! Each handler is a thin adapter: extract raw input, run the shared pipeline,
//! and hand the outcome to the view layer (HTML) or serialize it (JSON).

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::app::pipeline::{intake, parse_score, run_compare, run_prediction};
use crate::domain::{DEFAULT_SCORE, PredictionResult};
use crate::error::PredictError;
use crate::plot::{ChartData, format_marks, render_svg_chart};
use crate::web::AppState;
use crate::web::view::{PageView, PredictionView, render_page};

/// Chart size embedded in the page.
const CHART_SIZE: (u32, u32) = (640, 480);

/// Fields posted by the page form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub marks: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictQuery {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub score: String,
    pub resolution: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub score: String,
}

/// Public summary of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub name: String,
    pub label: String,
    pub min_score: f64,
    pub max_score: f64,
    pub points: usize,
}

/// JSON error body with a status derived from the error kind.
#[derive(Debug)]
pub struct ApiError(pub PredictError);

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PredictError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            PredictError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PredictError::InvalidTable { .. } | PredictError::Fit(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "api request failed");
        } else {
            tracing::warn!(error = %self.0, "api request rejected");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

/// `GET /`: empty form with defaults.
pub async fn index_get(State(state): State<AppState>) -> Html<String> {
    let default = state.dataset.default_category().name().to_string();
    let view = PageView::form(&state.dataset, &default, format_marks(DEFAULT_SCORE), state.bounds);
    Html(render_page(&view))
}

/// `POST /`: validate the form, predict and render the result.
pub async fn index_post(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Html<String> {
    Html(render_page(&build_result_page(&state, &form)))
}

/// Build the page for a submitted form. User errors become an inline message.
pub fn build_result_page(state: &AppState, form: &PredictForm) -> PageView {
    let mut view = PageView::form(&state.dataset, form.shift.trim(), form.marks.trim(), state.bounds);

    let outcome = intake(&state.dataset, &state.bounds, &form.shift, &form.marks)
        .and_then(|req| run_prediction(&state.dataset, &req, state.curve_resolution));

    match outcome {
        Ok(prediction) => {
            let result = &prediction.result;
            // `intake` guarantees the category exists.
            let Ok(table) = state.dataset.get(&result.category) else {
                view.error = Some(PredictError::UnknownCategory(result.category.clone()).to_string());
                return view;
            };
            let chart = ChartData::new(table, result);
            let svg = match render_svg_chart(&chart, CHART_SIZE.0, CHART_SIZE.1) {
                Ok(svg) => Some(svg),
                Err(err) => {
                    tracing::error!(error = %err, "chart rendering failed");
                    None
                }
            };
            view.prediction = Some(PredictionView::new(table, result, svg));
        }
        Err(err) => {
            if err.is_user_error() {
                tracing::warn!(error = %err, "form submission rejected");
            } else {
                tracing::error!(error = %err, "prediction failed");
            }
            view.error = Some(err.to_string());
        }
    }
    view
}

/// `GET /api/categories`
pub async fn categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    let infos = state
        .dataset
        .tables()
        .iter()
        .map(|t| {
            let (min_score, max_score) = t.score_range();
            CategoryInfo {
                name: t.name().to_string(),
                label: t.label(),
                min_score,
                max_score,
                points: t.len(),
            }
        })
        .collect();
    Json(infos)
}

/// `GET /api/predict?category=..&score=..[&resolution=..]`
pub async fn predict_api(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<PredictionResult>, ApiError> {
    let request = intake(&state.dataset, &state.bounds, &query.category, &query.score)?;
    let resolution = query.resolution.unwrap_or(state.curve_resolution);
    let prediction = run_prediction(&state.dataset, &request, resolution)?;
    Ok(Json(prediction.result))
}

/// `GET /api/compare?score=..`
pub async fn compare_api(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Vec<PredictionResult>>, ApiError> {
    let score = parse_score(&query.score)?;
    let results = run_compare(&state.dataset, &state.bounds, score, state.curve_resolution)?;
    Ok(Json(results))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
