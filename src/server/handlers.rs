use super::types::{PredictError, PredictForm, round2};
use crate::{
    Error,
    pipeline::PredictPipeline,
    views::{HomeView, Views},
};
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

const RENDER_FAILURE_PAGE: &str =
    "<!DOCTYPE html><html><body><p>An error occurred while rendering the page</p></body></html>";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<dyn PredictPipeline>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(pipeline: Arc<dyn PredictPipeline>, views: Views) -> Self {
        Self {
            pipeline,
            views: Arc::new(views),
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    match state.views.index() {
        Ok(html) => Html(html),
        Err(e) => {
            error!("Failed to render landing page: {}", e);
            Html(RENDER_FAILURE_PAGE.to_string())
        }
    }
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    render_home(&state.views, HomeView::form())
}

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn predict_datapoint(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(Form(pairs)) => PredictForm::from_pairs(pairs),
        Err(rejection) => {
            warn!("Could not decode form body, treating it as empty: {}", rejection);
            PredictForm::default()
        }
    };

    let view = match predict(state.pipeline.as_ref(), &form).await {
        Ok(prediction) => HomeView::prediction(
            prediction,
            form.reading_score.unwrap_or_default(),
            form.writing_score.unwrap_or_default(),
        ),
        Err(e) => {
            match &e {
                PredictError::MissingScores => warn!("Missing required scores"),
                PredictError::InvalidScore { field, value } => {
                    error!("Value error: could not convert {} '{}' to a number", field, value)
                }
                PredictError::Unclassified(inner) => error!("Prediction error: {}", inner),
            }
            HomeView::error(e.to_string())
        }
    };

    render_home(&state.views, view)
}

/// Validates the form and runs the pipeline, returning the rounded prediction.
pub async fn predict(
    pipeline: &dyn PredictPipeline,
    form: &PredictForm,
) -> Result<f64, PredictError> {
    let record = form.validate()?;

    let frame = record.to_frame();
    info!("Input frame:\n{}", frame);

    let results = pipeline.predict(&frame).await?;
    let first = results
        .first()
        .copied()
        .ok_or_else(|| Error::pipeline("pipeline returned no predictions"))?;

    let prediction = round2(first);
    info!("Prediction: {}", prediction);

    Ok(prediction)
}

/// Renders `home.html`; a rendering failure is reported through the same
/// view, and only if that fails too does a static page go out.
fn render_home(views: &Views, view: HomeView) -> Html<String> {
    match views.home(&view) {
        Ok(html) => Html(html),
        Err(e) => {
            error!("Failed to render view: {}", e);
            let fallback = HomeView::error(PredictError::Unclassified(e).to_string());
            match views.home(&fallback) {
                Ok(html) => Html(html),
                Err(e) => {
                    error!("Failed to render error page: {}", e);
                    Html(RENDER_FAILURE_PAGE.to_string())
                }
            }
        }
    }
}
