//! Slice reducers and the root reducer composing them.
//!
//! A slice reducer receives the current value of its slice and the action,
//! and returns `Some(next)` when the slice changes or `None` to keep it.
//! Slice reducers never fail: a malformed payload leaves the slice as is.

use std::sync::Arc;

use im::{HashMap, Vector};

use super::action::Action;
use super::state::{Messages, State};
use crate::environment::types::{NavLink, Toast, ToastPayload, User};

fn changed<T: PartialEq>(current: &T, next: T) -> Option<T> {
    (*current != next).then_some(next)
}

pub fn domain(state: &String, action: &Action) -> Option<String> {
    match action {
        Action::Init(context) => changed(state, context.domain.clone()?),
        _ => None,
    }
}

pub fn has_feedback_button(state: &bool, action: &Action) -> Option<bool> {
    match action {
        Action::Init(context) => changed(state, context.has_feedback_button),
        _ => None,
    }
}

pub fn is_session_loaded(state: &bool, action: &Action) -> Option<bool> {
    match action {
        Action::SetSessionContext(_) => changed(state, true),
        _ => None,
    }
}

pub fn is_2022(state: &bool, action: &Action) -> Option<bool> {
    match action {
        Action::SetSessionContext(context) => {
            changed(state, context.user.as_ref().map_or(false, |u| u.is_2022))
        }
        Action::SetIs2022 => changed(state, true),
        _ => None,
    }
}

pub fn feature_flags(
    state: &HashMap<String, bool>,
    action: &Action,
) -> Option<HashMap<String, bool>> {
    match action {
        Action::SetSessionContext(context) => {
            let flags = context.feature_flags.as_ref()?;
            changed(state, flags.iter().map(|(k, v)| (k.clone(), *v)).collect())
        }
        _ => None,
    }
}

pub fn user(state: &Option<User>, action: &Action) -> Option<Option<User>> {
    match action {
        Action::SetSessionContext(context) => changed(state, Some(context.user.clone()?)),
        _ => None,
    }
}

pub fn csrf_token(state: &Option<String>, action: &Action) -> Option<Option<String>> {
    match action {
        Action::SetSessionContext(context) => changed(state, Some(context.csrf_token.clone()?)),
        _ => None,
    }
}

/// Merge named hrefs over the current ones. Keys are added or overwritten, never removed.
pub fn routes(
    state: &HashMap<String, String>,
    action: &Action,
) -> Option<HashMap<String, String>> {
    let incoming = match action {
        Action::Init(context) => context.routes.as_ref()?,
        Action::SetSessionContext(context) => context.routes.as_ref()?,
        _ => return None,
    };
    let mut next = state.clone();
    let mut dirty = false;
    for (name, href) in incoming {
        if next.get(name) != Some(href) {
            next.insert(name.clone(), href.clone());
            dirty = true;
        }
    }
    dirty.then_some(next)
}

pub fn toasts(state: &Vector<Toast>, action: &Action) -> Option<Vector<Toast>> {
    match action {
        Action::SetSessionContext(context) => append_toasts(state, context.toasts.as_ref()?),
        Action::AddToasts { toasts } => append_toasts(state, toasts.as_ref()?),
        Action::ClearToast { toast_id } => {
            let next: Vector<Toast> = state
                .iter()
                .filter(|t| &t.toast_id != toast_id)
                .cloned()
                .collect();
            (next.len() != state.len()).then_some(next)
        }
        Action::ClearAllToasts => (!state.is_empty()).then(Vector::new),
        _ => None,
    }
}

fn append_toasts(state: &Vector<Toast>, toasts: &[ToastPayload]) -> Option<Vector<Toast>> {
    if toasts.is_empty() {
        return None;
    }
    let mut next = state.clone();
    next.extend(toasts.iter().cloned().map(Toast::new));
    Some(next)
}

pub fn back_link(state: &Option<NavLink>, action: &Action) -> Option<Option<NavLink>> {
    match action {
        Action::Init(context) => changed(state, Some(context.back_link.clone()?)),
        Action::SetBackLink { back_link } => changed(state, back_link.clone()),
        _ => None,
    }
}

pub fn top_bar_right_link(state: &Option<NavLink>, action: &Action) -> Option<Option<NavLink>> {
    match action {
        Action::Init(context) => changed(state, Some(context.top_bar_right_link.clone()?)),
        Action::SetTopBarRightLink { top_bar_right_link } => {
            changed(state, top_bar_right_link.clone())
        }
        _ => None,
    }
}

pub fn admin_link(state: &Option<NavLink>, action: &Action) -> Option<Option<NavLink>> {
    match action {
        Action::Init(context) => changed(state, Some(context.admin_link.clone()?)),
        Action::SetAdminLink { admin_link } => changed(state, admin_link.clone()),
        _ => None,
    }
}

pub fn messages(state: &Messages, action: &Action) -> Option<Messages> {
    match action {
        Action::SetMessages { messages } => {
            // a bulk load never overwrites a message we already know about
            let mut next = state.clone();
            let mut dirty = false;
            for message in messages.as_ref()? {
                if !message.has_id() {
                    log::warn!("Ignoring message without id in bulk load");
                    continue;
                }
                if !next.contains_key(&message.id) {
                    next.insert(message.id.clone(), Some(message.clone()));
                    dirty = true;
                }
            }
            dirty.then_some(next)
        }
        Action::ClearMessages => (!state.is_empty()).then(Messages::new),
        Action::SetMessage { message } => {
            let next = message
                .as_ref()
                .filter(|m| m.has_id())
                .map(|m| (m.id.clone(), Some(m.clone())))
                .into_iter()
                .collect();
            changed(state, next)
        }
        Action::CreatedMessage(result) => {
            // a new message goes first, ahead of everything already loaded
            let message = result.valid_message()?;
            let mut next = state.clone();
            next.insert_front(message.id.clone(), Some(message.clone()));
            changed(state, next)
        }
        Action::UpdatedMessage(result) => {
            let message = result.valid_message()?;
            if state.get(&message.id) == Some(&Some(message.clone())) {
                return None;
            }
            Some(state.update(message.id.clone(), Some(message.clone())))
        }
        Action::DeletedMessage(result) => {
            let message = result.valid_message()?;
            if state.get(&message.id) == Some(&None) {
                return None;
            }
            Some(state.update(message.id.clone(), None))
        }
        Action::CreatedComment(result) => {
            let (id, comment) = result.valid_target()?;
            let mut message = state.get(id)?.clone()?;
            message.comments.push_back(comment.clone());
            if let Some(count) = message.comment_count.as_mut() {
                *count += 1;
            }
            Some(state.update(id.to_string(), Some(message)))
        }
        Action::DeletedComment(result) => {
            let (id, comment) = result.valid_target()?;
            let mut message = state.get(id)?.clone()?;
            message.comments.retain(|c| c.id != comment.id);
            if let Some(count) = message.comment_count.as_mut() {
                *count -= 1;
            }
            Some(state.update(id.to_string(), Some(message)))
        }
        _ => None,
    }
}

pub fn is_loading_messages(state: &bool, action: &Action) -> Option<bool> {
    match action {
        Action::LoadingMessages | Action::RefreshingMessages => changed(state, true),
        Action::SetMessages { .. } | Action::SetMessage { .. } | Action::RefreshedMessages => {
            changed(state, false)
        }
        _ => None,
    }
}

pub fn is_updating_messages(state: &bool, action: &Action) -> Option<bool> {
    match action {
        Action::CreatingMessage
        | Action::UpdatingMessage
        | Action::DeletingMessage
        | Action::ReportingMessage
        | Action::CreatingComment
        | Action::DeletingComment
        | Action::ReportingComment => changed(state, true),
        Action::CreatedMessage(_)
        | Action::UpdatedMessage(_)
        | Action::DeletedMessage(_)
        | Action::ReportedMessage
        | Action::CreatedComment(_)
        | Action::DeletedComment(_)
        | Action::ReportedComment => changed(state, false),
        _ => None,
    }
}

/// Run every slice reducer, in declaration order, against `state`.
///
/// Returns the very same `Arc` when no slice changed, so consumers can
/// detect changes with `Arc::ptr_eq`.
pub fn reduce(state: &Arc<State>, action: &Action) -> Arc<State> {
    log::trace!("{}", action.name());
    let mut next: Option<State> = None;

    macro_rules! slices {
        ($($slice:ident),* $(,)?) => {
            $(
                if let Some(value) = $slice(&state.$slice, action) {
                    log::debug!("{} changed {}", action.name(), stringify!($slice));
                    next.get_or_insert_with(|| State::clone(state)).$slice = value;
                }
            )*
        };
    }

    slices!(
        has_feedback_button,
        is_session_loaded,
        is_2022,
        feature_flags,
        user,
        domain,
        csrf_token,
        routes,
        toasts,
        back_link,
        top_bar_right_link,
        admin_link,
        messages,
        is_loading_messages,
        is_updating_messages,
    );

    match next {
        Some(next) => Arc::new(next),
        None => Arc::clone(state),
    }
}
