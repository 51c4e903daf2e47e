pub mod campaign;
pub mod config;
pub mod error;
pub mod tier;

pub use campaign::*;
pub use config::Config;
pub use error::*;
pub use tier::*;
