use serde::{Deserialize, Serialize};
use std::fmt;

pub const GENDER: &str = "gender";
pub const RACE_ETHNICITY: &str = "race_ethnicity";
pub const PARENTAL_LEVEL_OF_EDUCATION: &str = "parental_level_of_education";
pub const LUNCH: &str = "lunch";
pub const TEST_PREPARATION_COURSE: &str = "test_preparation_course";
pub const READING_SCORE: &str = "reading_score";
pub const WRITING_SCORE: &str = "writing_score";

/// Column order of a frame built from a [`StudentRecord`].
pub const COLUMNS: [&str; 7] = [
    GENDER,
    RACE_ETHNICITY,
    PARENTAL_LEVEL_OF_EDUCATION,
    LUNCH,
    TEST_PREPARATION_COURSE,
    READING_SCORE,
    WRITING_SCORE,
];

/// One validated prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub gender: Option<String>,
    pub race_ethnicity: Option<String>,
    pub parental_level_of_education: Option<String>,
    pub lunch: Option<String>,
    pub test_preparation_course: Option<String>,
    pub reading_score: f64,
    pub writing_score: f64,
}

impl StudentRecord {
    pub fn to_frame(&self) -> FeatureFrame {
        let row = vec![
            Cell::from(self.gender.clone()),
            Cell::from(self.race_ethnicity.clone()),
            Cell::from(self.parental_level_of_education.clone()),
            Cell::from(self.lunch.clone()),
            Cell::from(self.test_preparation_course.clone()),
            Cell::Number(self.reading_score),
            Cell::Number(self.writing_score),
        ];
        FeatureFrame {
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: vec![row],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map(Cell::Text).unwrap_or(Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => f.write_str("None"),
        }
    }
}

/// Named columns over row-major cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl FeatureFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }
}

impl fmt::Display for FeatureFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                rendered
                    .iter()
                    .filter_map(|row| row.get(i).map(String::len))
                    .fold(name.len(), usize::max)
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, &w)| format!("{name:>w$}"))
            .collect();
        write!(f, "   {}", header.join("  "))?;

        for (index, row) in rendered.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:>w$}"))
                .collect();
            write!(f, "\n{index:<3}{}", cells.join("  "))?;
        }
        Ok(())
    }
}
