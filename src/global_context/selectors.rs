//! Read-only projections of the global state.

use super::state::State;
use crate::environment::types::{Message, NavLink, Toast, User};

pub fn get_domain(state: &State) -> &str {
    &state.domain
}

pub fn get_has_feedback_button(state: &State) -> bool {
    state.has_feedback_button
}

pub fn get_is_session_loaded(state: &State) -> bool {
    state.is_session_loaded
}

pub fn get_is_2022(state: &State) -> bool {
    state.is_2022
}

pub fn get_user(state: &State) -> Option<&User> {
    state.user.as_ref()
}

pub fn get_is_connected(state: &State) -> bool {
    state.user.is_some()
}

pub fn get_csrf_token(state: &State) -> Option<&str> {
    state.csrf_token.as_deref()
}

pub fn get_feature_flag(state: &State, name: &str) -> bool {
    state.feature_flags.get(name).copied().unwrap_or(false)
}

pub fn get_routes(state: &State) -> &im::HashMap<String, String> {
    &state.routes
}

pub fn get_route_by_id<'a>(state: &'a State, id: &str) -> Option<&'a str> {
    state.routes.get(id).map(String::as_str)
}

/// `path` made absolute against the configured domain.
pub fn get_absolute_url(state: &State, path: &str) -> Option<String> {
    let base = url::Url::parse(&state.domain).ok()?;
    base.join(path).ok().map(String::from)
}

pub fn get_toasts(state: &State) -> &im::Vector<Toast> {
    &state.toasts
}

/// Protected links are hidden once the session is known to be anonymous.
/// Before the session is loaded they are shown optimistically.
fn visible_link<'a>(state: &State, link: Option<&'a NavLink>) -> Option<&'a NavLink> {
    let link = link?;
    if link.is_protected && state.is_session_loaded && state.user.is_none() {
        return None;
    }
    Some(link)
}

pub fn get_back_link(state: &State) -> Option<&NavLink> {
    visible_link(state, state.back_link.as_ref())
}

pub fn get_top_bar_right_link(state: &State) -> Option<&NavLink> {
    visible_link(state, state.top_bar_right_link.as_ref())
}

pub fn get_admin_link(state: &State) -> Option<&NavLink> {
    state.admin_link.as_ref()
}

/// Every loaded message that has not been deleted, in display order.
pub fn get_messages(state: &State) -> Vec<&Message> {
    state.messages.values().flatten().collect()
}

/// `None` both for deleted and for unknown messages.
pub fn get_message_by_id<'a>(state: &'a State, id: &str) -> Option<&'a Message> {
    state.messages.get(id)?.as_ref()
}

pub fn get_is_loading_messages(state: &State) -> bool {
    state.is_loading_messages
}

pub fn get_is_updating_messages(state: &State) -> bool {
    state.is_updating_messages
}
