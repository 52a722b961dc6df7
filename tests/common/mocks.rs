use async_trait::async_trait;
use score_predictor::{
    Error, Result,
    pipeline::{FeatureFrame, PredictPipeline},
};
use std::sync::{Arc, Mutex};

/// Stub pipeline that records every frame it receives
#[derive(Debug, Clone)]
pub struct StubPipeline {
    pub frames: Arc<Mutex<Vec<FeatureFrame>>>,
    pub outcome: std::result::Result<Vec<f64>, String>,
}

impl StubPipeline {
    pub fn returning(values: Vec<f64>) -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
            outcome: Ok(values),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
            outcome: Err(error.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn get_frames(&self) -> Vec<FeatureFrame> {
        self.frames.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictPipeline for StubPipeline {
    async fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        self.frames.lock().unwrap().push(frame.clone());

        match &self.outcome {
            Ok(values) => Ok(values.clone()),
            Err(error) => Err(Error::pipeline(error.clone())),
        }
    }
}
