use std::collections::HashMap;

use serde::Deserialize;
use strum_macros::IntoStaticStr;

use crate::environment::types::{Comment, Message, NavLink, ToastPayload, User};
use crate::environment::InitialContext;

/// Every action the global store understands.
///
/// Actions deserialize from `{"type": "SET_MESSAGES", ...payload}`. A `type`
/// that is not listed here becomes `Action::Unknown`, which changes nothing.
#[derive(Clone, Debug, Deserialize, IntoStaticStr, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Init(InitialContext),
    SetSessionContext(SessionContext),
    #[serde(rename = "SET_IS_2022")]
    #[strum(serialize = "SET_IS_2022")]
    SetIs2022,

    AddToasts {
        #[serde(default, deserialize_with = "crate::helper::deserialize_lenient_list")]
        toasts: Option<Vec<ToastPayload>>,
    },
    ClearToast {
        #[serde(default, rename = "toastId")]
        toast_id: String,
    },
    ClearAllToasts,

    SetBackLink {
        #[serde(default, rename = "backLink")]
        back_link: Option<NavLink>,
    },
    SetTopBarRightLink {
        #[serde(default, rename = "topBarRightLink")]
        top_bar_right_link: Option<NavLink>,
    },
    SetAdminLink {
        #[serde(default, rename = "adminLink")]
        admin_link: Option<NavLink>,
    },

    LoadingMessages,
    RefreshingMessages,
    RefreshedMessages,
    SetMessages {
        #[serde(default, deserialize_with = "crate::helper::deserialize_lenient_list")]
        messages: Option<Vec<Message>>,
    },
    ClearMessages,
    SetMessage {
        #[serde(default)]
        message: Option<Message>,
    },

    CreatingMessage,
    CreatedMessage(MessageResult),
    UpdatingMessage,
    UpdatedMessage(MessageResult),
    DeletingMessage,
    DeletedMessage(MessageResult),
    ReportingMessage,
    ReportedMessage,

    CreatingComment,
    CreatedComment(CommentResult),
    DeletingComment,
    DeletedComment(CommentResult),
    ReportingComment,
    ReportedComment,

    #[serde(other)]
    Unknown,
}

/// Payload of the session context the server answers with once per page.
#[derive(Default, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_non_empty")]
    pub csrf_token: Option<String>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient")]
    pub feature_flags: Option<HashMap<String, bool>>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient")]
    pub routes: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient_list")]
    pub toasts: Option<Vec<ToastPayload>>,
}

/// The outcome of a message request.
#[derive(Default, Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct MessageResult {
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_truthy")]
    pub error: bool,
}

/// The outcome of a comment request on `message`.
#[derive(Default, Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct CommentResult {
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_truthy")]
    pub error: bool,
}

impl MessageResult {
    pub fn ok(message: Message) -> Self {
        Self {
            message: Some(message),
            error: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            message: None,
            error: true,
        }
    }

    /// The message if the request succeeded and the message has an id.
    pub fn valid_message(&self) -> Option<&Message> {
        if self.error {
            return None;
        }
        self.message.as_ref().filter(|m| m.has_id())
    }
}

impl CommentResult {
    pub fn ok(message: Message, comment: Comment) -> Self {
        Self {
            message: Some(message),
            comment: Some(comment),
            error: false,
        }
    }

    /// The addressed message id and the comment, if the request succeeded.
    pub fn valid_target(&self) -> Option<(&str, &Comment)> {
        if self.error {
            return None;
        }
        let message = self.message.as_ref().filter(|m| m.has_id())?;
        Some((message.id.as_str(), self.comment.as_ref()?))
    }
}

impl Action {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The action type, as found in the `type` field.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn add_toasts(toasts: Vec<ToastPayload>) -> Self {
        Action::AddToasts {
            toasts: Some(toasts),
        }
    }

    pub fn set_messages(messages: Vec<Message>) -> Self {
        Action::SetMessages {
            messages: Some(messages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_unknown_type() {
        let action = Action::from_json(r#"{"type": "SOMETHING_NEW", "payload": 1}"#).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[rstest]
    fn test_non_list_toasts_are_ignored() {
        let action = Action::from_json(r#"{"type": "ADD_TOASTS", "toasts": "oops"}"#).unwrap();
        assert_eq!(action, Action::AddToasts { toasts: None });
    }

    #[rstest]
    fn test_error_flag_is_truthy() {
        let action = Action::from_json(
            r#"{"type": "DELETED_MESSAGE", "message": {"id": "1"}, "error": {"detail": "nope"}}"#,
        )
        .unwrap();
        let Action::DeletedMessage(result) = action else {
            panic!("unexpected action");
        };
        assert!(result.error);
        assert_eq!(result.valid_message(), None);
    }

    #[rstest]
    fn test_session_context() {
        let action = Action::from_json(
            r#"{
                "type": "SET_SESSION_CONTEXT",
                "user": {"id": "u1"},
                "csrfToken": "tok",
                "featureFlags": {"map": true}
            }"#,
        )
        .unwrap();
        let Action::SetSessionContext(context) = action else {
            panic!("unexpected action");
        };
        assert_eq!(context.user.map(|u| u.id).as_deref(), Some("u1"));
        assert_eq!(context.csrf_token.as_deref(), Some("tok"));
        assert_eq!(context.feature_flags.unwrap().get("map"), Some(&true));
    }

    #[rstest]
    fn test_malformed_session_fields_are_dropped() {
        let action = Action::from_json(
            r#"{
                "type": "SET_SESSION_CONTEXT",
                "user": {"displayName": "Sans identifiant"},
                "csrfToken": "tok",
                "featureFlags": ["map"]
            }"#,
        )
        .unwrap();
        let Action::SetSessionContext(context) = action else {
            panic!("unexpected action");
        };
        assert_eq!(context.user, None);
        assert_eq!(context.feature_flags, None);
        assert_eq!(context.csrf_token.as_deref(), Some("tok"));
    }

    #[rstest]
    fn test_clear_toast_without_id() {
        let action = Action::from_json(r#"{"type": "CLEAR_TOAST"}"#).unwrap();
        assert_eq!(
            action,
            Action::ClearToast {
                toast_id: String::new()
            }
        );
    }

    #[rstest]
    #[case(Action::SetIs2022, "SET_IS_2022")]
    #[case(Action::ClearAllToasts, "CLEAR_ALL_TOASTS")]
    #[case(Action::CreatedComment(CommentResult::default()), "CREATED_COMMENT")]
    fn test_action_name(#[case] action: Action, #[case] expected: &str) {
        assert_eq!(action.name(), expected);
    }

    #[rstest]
    fn test_comment_target_requires_comment() {
        let result = CommentResult {
            message: Some(Message::new("1", "")),
            comment: None,
            error: false,
        };
        assert_eq!(result.valid_target(), None);
    }
}
