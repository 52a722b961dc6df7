pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod server;
pub mod views;

pub use error::{Error, Result};
