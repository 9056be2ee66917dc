//! The global UI and session state: actions, slice reducers, selectors and
//! the store that ties them together.

mod action;
mod reducer;
pub mod selectors;
mod state;
mod store;

pub use action::{Action, CommentResult, MessageResult, SessionContext};
pub use reducer::reduce;
pub use state::{Messages, State, DEFAULT_DOMAIN};
pub use store::{Listener, Store};
