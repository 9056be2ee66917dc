//! The route table: named path patterns, matching and link generation.

mod config;
mod error;
mod pattern;
mod registry;

pub use config::{Pathname, RouteConfig, RouteSpec};
pub use error::RouteError;
pub use pattern::PathPattern;
pub use registry::{RouteRegistry, BASE_PATH, ROUTES};
