pub mod config;
pub mod types;

pub use config::InitialContext;
