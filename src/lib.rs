pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod table;
pub mod sheets;
pub mod apps_script;
pub mod address;
pub mod export;

pub use error::{PicoError, Result};
