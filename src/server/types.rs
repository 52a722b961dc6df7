use crate::pipeline::StudentRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw fields of the prediction form. Absent fields stay `None`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PredictForm {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub ethnicity_group: Option<String>,
    #[serde(default)]
    pub parental_level_of_education: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub test_preparation_course: Option<String>,
    #[serde(default)]
    pub reading_score: Option<String>,
    #[serde(default)]
    pub writing_score: Option<String>,
}

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Please provide both reading and writing scores")]
    MissingScores,

    #[error("Please enter valid numeric scores")]
    InvalidScore { field: &'static str, value: String },

    #[error("An error occurred: {0}")]
    Unclassified(#[from] crate::Error),
}

impl PredictForm {
    /// Builds the form from decoded key/value pairs. When a key repeats, the
    /// first value wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "gender" => &mut form.gender,
                "ethnicity_group" => &mut form.ethnicity_group,
                "parental_level_of_education" => &mut form.parental_level_of_education,
                "lunch" => &mut form.lunch,
                "test_preparation_course" => &mut form.test_preparation_course,
                "reading_score" => &mut form.reading_score,
                "writing_score" => &mut form.writing_score,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        form
    }

    /// Checks the scores (presence first, then format) and builds the record.
    /// Categorical fields pass through unchecked.
    pub fn validate(&self) -> Result<StudentRecord, PredictError> {
        let (Some(reading), Some(writing)) = (
            non_empty(&self.reading_score),
            non_empty(&self.writing_score),
        ) else {
            return Err(PredictError::MissingScores);
        };

        Ok(StudentRecord {
            gender: self.gender.clone(),
            race_ethnicity: self.ethnicity_group.clone(),
            parental_level_of_education: self.parental_level_of_education.clone(),
            lunch: self.lunch.clone(),
            test_preparation_course: self.test_preparation_course.clone(),
            reading_score: parse_score("reading_score", reading)?,
            writing_score: parse_score("writing_score", writing)?,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_score(field: &'static str, value: &str) -> Result<f64, PredictError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
        .ok_or_else(|| PredictError::InvalidScore {
            field,
            value: value.to_string(),
        })
}

/// Rounds to two decimal places against the exact binary value, ties to even.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
