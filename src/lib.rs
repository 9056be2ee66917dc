//! Client-side routing and global state for the Action Populaire front end.
//!
//! The [`routes`] module holds the named route table: each route compiles
//! its path pattern once into a matcher and a link builder. The
//! [`global_context`] module holds the state tree, updated only by
//! dispatching [`Action`]s through the [`Store`], and read through
//! [`selectors`](global_context::selectors).

mod app;
pub mod environment;
pub mod error;
pub mod global_context;
mod helper;
pub mod routes;

pub use app::{init_logging, App};
pub use environment::InitialContext;
pub use error::Error;
pub use global_context::{Action, State, Store};
pub use routes::{RouteConfig, RouteRegistry, ROUTES};
