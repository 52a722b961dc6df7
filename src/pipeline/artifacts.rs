use super::types::{Cell, FeatureFrame};
use crate::{Error, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub column: String,
    /// Imputed when the cell is missing.
    pub median: f64,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub column: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub most_frequent: Option<String>,
}

/// Fitted feature transform: scaled numeric columns followed by one-hot
/// encoded categorical columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    #[serde(default)]
    pub numerical: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

impl Preprocessor {
    pub fn feature_count(&self) -> usize {
        self.numerical.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    pub fn transform(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>> {
        (0..frame.len())
            .map(|row| self.transform_row(frame, row))
            .collect()
    }

    fn transform_row(&self, frame: &FeatureFrame, row: usize) -> Result<Vec<f64>> {
        let mut features = Vec::with_capacity(self.feature_count());

        for col in &self.numerical {
            let value = match lookup(frame, row, &col.column)? {
                Cell::Number(n) => *n,
                Cell::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                    Error::pipeline(format!(
                        "could not convert '{}' in column '{}' to a number",
                        s, col.column
                    ))
                })?,
                Cell::Missing => col.median,
            };
            let std = if col.std == 0.0 { 1.0 } else { col.std };
            features.push((value - col.mean) / std);
        }

        for col in &self.categorical {
            let value = match lookup(frame, row, &col.column)? {
                Cell::Text(s) => s.clone(),
                Cell::Number(n) => n.to_string(),
                Cell::Missing => col.most_frequent.clone().ok_or_else(|| {
                    Error::pipeline(format!(
                        "missing value in column '{}' with no fallback category",
                        col.column
                    ))
                })?,
            };
            let hot = col
                .categories
                .iter()
                .position(|c| *c == value)
                .ok_or_else(|| Error::UnknownCategory {
                    column: col.column.clone(),
                    value: value.clone(),
                })?;
            features.extend((0..col.categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
        }

        Ok(features)
    }
}

fn lookup<'a>(frame: &'a FeatureFrame, row: usize, column: &str) -> Result<&'a Cell> {
    frame.get(row, column).ok_or_else(|| Error::ColumnNotFound {
        column: column.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

impl Regressor {
    pub fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        match self {
            Regressor::Linear {
                intercept,
                coefficients,
            } => features
                .iter()
                .map(|row| {
                    if row.len() != coefficients.len() {
                        return Err(Error::pipeline(format!(
                            "model expects {} features but preprocessor produced {}",
                            coefficients.len(),
                            row.len()
                        )));
                    }
                    Ok(intercept + row.iter().zip(coefficients).map(|(x, w)| x * w).sum::<f64>())
                })
                .collect(),
        }
    }
}

pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let shown = path.display().to_string();
    debug!("Loading artifact from: {}", shown);

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::artifact(&shown, e))?;
    serde_json::from_str(&raw).map_err(|e| Error::artifact(&shown, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::StudentRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn preprocessor() -> Preprocessor {
        serde_json::from_value(json!({
            "numerical": [
                {"column": "reading_score", "median": 70.0, "mean": 70.0, "std": 10.0},
                {"column": "writing_score", "median": 69.0, "mean": 68.0, "std": 0.0}
            ],
            "categorical": [
                {"column": "gender", "categories": ["female", "male"]},
                {"column": "lunch", "categories": ["free/reduced", "standard"], "most_frequent": "standard"}
            ]
        }))
        .unwrap()
    }

    fn record(gender: Option<&str>, lunch: Option<&str>) -> StudentRecord {
        StudentRecord {
            gender: gender.map(str::to_string),
            race_ethnicity: Some("group A".to_string()),
            parental_level_of_education: None,
            lunch: lunch.map(str::to_string),
            test_preparation_course: None,
            reading_score: 80.0,
            writing_score: 70.0,
        }
    }

    #[test]
    fn test_transform_scales_then_one_hot_encodes() {
        let frame = record(Some("male"), Some("free/reduced")).to_frame();
        let features = preprocessor().transform(&frame).unwrap();
        assert_eq!(features, vec![vec![1.0, 2.0, 0.0, 1.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_missing_category_uses_most_frequent() {
        let frame = record(Some("female"), None).to_frame();
        let features = preprocessor().transform(&frame).unwrap();
        assert_eq!(&features[0][4..], &[0.0, 1.0]);
    }

    #[test]
    fn test_missing_category_without_fallback_fails() {
        let frame = record(None, Some("standard")).to_frame();
        let err = preprocessor().transform(&frame).unwrap_err();
        assert!(err.to_string().contains("gender"));
    }

    #[test]
    fn test_unknown_category_fails() {
        let frame = record(Some("other"), Some("standard")).to_frame();
        let err = preprocessor().transform(&frame).unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { ref value, .. } if value == "other"));
    }

    #[test]
    fn test_missing_column_fails() {
        let mut frame = record(Some("male"), Some("standard")).to_frame();
        frame.columns[0] = "sex".to_string();
        let err = preprocessor().transform(&frame).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { ref column } if column == "gender"));
    }

    #[test]
    fn test_linear_regressor_predicts() {
        let model: Regressor = serde_json::from_value(json!({
            "kind": "linear",
            "intercept": 10.0,
            "coefficients": [2.0, -1.0]
        }))
        .unwrap();
        let predictions = model.predict(&[vec![3.0, 4.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(predictions, vec![12.0, 10.0]);
    }

    #[test]
    fn test_linear_regressor_rejects_wrong_width() {
        let model = Regressor::Linear {
            intercept: 0.0,
            coefficients: vec![1.0],
        };
        let err = model.predict(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(err.to_string().contains("expects 1 features"));
    }

    #[tokio::test]
    async fn test_load_json_reports_path_on_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_json::<Regressor>(&path).await.unwrap_err();
        assert!(matches!(err, Error::Artifact { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
