use crate::Result;
use minijinja::Environment;
use serde::Serialize;

pub const INDEX: &str = "index.html";
pub const HOME: &str = "home.html";

/// Context for `home.html`. Every field is optional; the form alone is
/// rendered when all are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeView {
    pub prediction: Option<f64>,
    pub reading_score: Option<String>,
    pub writing_score: Option<String>,
    pub error: Option<String>,
}

impl HomeView {
    pub fn form() -> Self {
        Self::default()
    }

    pub fn prediction(prediction: f64, reading_score: String, writing_score: String) -> Self {
        Self {
            prediction: Some(prediction),
            reading_score: Some(reading_score),
            writing_score: Some(writing_score),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../../templates/index.html"))?;
        env.add_template(HOME, include_str!("../../templates/home.html"))?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }

    pub fn index(&self) -> Result<String> {
        self.render(INDEX, minijinja::context! {})
    }

    pub fn home(&self, view: &HomeView) -> Result<String> {
        self.render(HOME, view)
    }
}
