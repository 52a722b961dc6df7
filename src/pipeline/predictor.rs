use super::{
    artifacts::{Preprocessor, Regressor, load_json},
    types::FeatureFrame,
};
use crate::{Result, config::PipelineConfig};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

#[async_trait]
pub trait PredictPipeline: Send + Sync {
    /// Returns one prediction per frame row.
    async fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>>;
}

/// Pipeline backed by JSON artifacts on disk. Both artifacts are read on
/// every call, so replacing the files takes effect without a restart.
pub struct ArtifactPipeline {
    model_path: PathBuf,
    preprocessor_path: PathBuf,
}

impl ArtifactPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            model_path: config.model_path,
            preprocessor_path: config.preprocessor_path,
        }
    }
}

#[async_trait]
impl PredictPipeline for ArtifactPipeline {
    async fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        let model: Regressor = load_json(&self.model_path).await?;
        let preprocessor: Preprocessor = load_json(&self.preprocessor_path).await?;

        let features = preprocessor.transform(frame)?;
        debug!(
            "Transformed {} rows into {} features each",
            features.len(),
            preprocessor.feature_count()
        );

        model.predict(&features)
    }
}
