//! Error types for route compilation, link generation and registry validation.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route pattern is empty")]
    EmptyPattern,
    #[error("Route pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),
    #[error("Route pattern length {length} exceeds maximum allowed length of {max} bytes")]
    PatternTooLong { length: usize, max: usize },
    #[error("Invalid parameter name in '{pattern}' at byte {position}")]
    InvalidParameter { pattern: String, position: usize },
    #[error("Parameter '{name}' appears more than once in '{pattern}'")]
    DuplicateParameter { pattern: String, name: String },
    #[error("Failed to compile pattern '{pattern}': {message}")]
    Regex { pattern: String, message: String },
    #[error("Route '{0}' has no pathname")]
    EmptyPathname(String),
    #[error("Missing parameter '{name}' for '{pattern}'")]
    MissingParameter { pattern: String, name: String },
    #[error("Parameter '{name}' for '{pattern}' is not a valid path segment")]
    InvalidParameterValue { pattern: String, name: String },
    #[error("Route '{0}' is registered twice")]
    DuplicateRoute(String),
    #[error("Routes '{first}' and '{second}' can match the same path")]
    AmbiguousRoutes { first: String, second: String },
    #[error("Route '{route}' is shadowed by '{shadowed_by}' which is registered before it")]
    ShadowedRoute { route: String, shadowed_by: String },
}
