use super::mocks::StubPipeline;
use axum::Router;
use score_predictor::{
    config::PipelineConfig,
    pipeline::{ArtifactPipeline, PredictPipeline},
    server::{build_router, handlers::AppState, types::PredictForm},
    views::Views,
};
use std::{path::PathBuf, sync::Arc};

/// Build the router around a stub pipeline, returning the stub for inspection
pub fn create_test_app(stub: StubPipeline) -> (Router, Arc<StubPipeline>) {
    let stub = Arc::new(stub);
    let app = create_app_with(stub.clone());
    (app, stub)
}

pub fn create_app_with(pipeline: Arc<dyn PredictPipeline>) -> Router {
    let views = Views::new().expect("templates should compile");
    build_router(AppState::new(pipeline, views), false)
}

/// Pipeline reading the artifacts shipped at the repository root
pub fn shipped_pipeline() -> ArtifactPipeline {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    ArtifactPipeline::new(PipelineConfig {
        model_path: root.join("artifacts/model.json"),
        preprocessor_path: root.join("artifacts/preprocessor.json"),
    })
}

/// A complete, valid form submission
pub fn valid_form() -> PredictForm {
    PredictForm {
        gender: Some("female".to_string()),
        ethnicity_group: Some("group B".to_string()),
        parental_level_of_education: Some("bachelor's degree".to_string()),
        lunch: Some("standard".to_string()),
        test_preparation_course: Some("none".to_string()),
        reading_score: Some("72".to_string()),
        writing_score: Some("74".to_string()),
    }
}

pub const MISSING_SCORES: &str = "Please provide both reading and writing scores";
pub const INVALID_SCORES: &str = "Please enter valid numeric scores";
pub const UNCLASSIFIED_PREFIX: &str = "An error occurred: ";
