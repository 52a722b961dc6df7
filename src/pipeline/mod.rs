pub mod artifacts;
pub mod predictor;
pub mod types;

pub use predictor::*;
pub use types::*;
