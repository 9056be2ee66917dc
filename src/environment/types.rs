use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString, IntoStaticStr};

// Session Types

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "is2022")]
    pub is_2022: bool,
}

/// A navigation affordance such as the back arrow or the top bar action.
///
/// `route` names either a registered route id or a server-provided named
/// href; `href` is used verbatim when present.
#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_protected: bool,
}

impl NavLink {
    pub fn route(route: &str, label: &str) -> Self {
        Self {
            route: Some(route.to_string()),
            label: Some(label.to_string()),
            ..Default::default()
        }
    }

    pub fn protected(mut self) -> Self {
        self.is_protected = true;
        self
    }
}

// Toasts

/// Payloads may spell the level in any case; anything unrecognised is `Info`.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A toast as supplied by an action, before it enters the state.
///
/// Fields other than `message` and `type` are kept in `extra` for the
/// presentation layer.
#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct ToastPayload {
    #[serde(default)]
    pub message: String,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "crate::helper::deserialize_lenient_enum"
    )]
    pub level: ToastLevel,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToastPayload {
    pub fn new(message: &str, level: ToastLevel) -> Self {
        Self {
            message: message.to_string(),
            level,
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub toast_id: String,
    pub message: String,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "crate::helper::deserialize_lenient_enum"
    )]
    pub level: ToastLevel,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Toast {
    /// The id is always freshly generated; an id carried by the payload is never reused.
    pub fn new(payload: ToastPayload) -> Self {
        let mut extra = payload.extra;
        extra.remove("toastId");
        Self {
            toast_id: crate::helper::generate_toast_id(),
            message: payload.message,
            level: payload.level,
            extra,
        }
    }
}

// Messages

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Older payloads call this list `recentComments`
    #[serde(default, alias = "recentComments")]
    pub comments: im::Vector<Comment>,
    #[serde(default)]
    pub comment_count: Option<i64>,
    /// Everything else the server sends along (group, linked event, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    fn test_message_accepts_legacy_comment_list() {
        let message: Message = serde_json::from_str(
            r#"{"id": "1", "recentComments": [{"id": "c1"}], "commentCount": 1}"#,
        )
        .unwrap();
        assert_eq!(message.comments.len(), 1);
        assert_eq!(message.comments[0].id, "c1");
        assert_eq!(message.comment_count, Some(1));
    }

    #[rstest]
    fn test_toast_ignores_payload_id() {
        let payload: ToastPayload =
            serde_json::from_str(r#"{"toastId": "x", "message": "Hi", "type": "SUCCESS"}"#)
                .unwrap();
        let toast = Toast::new(payload);
        assert_ne!(toast.toast_id, "x");
        assert_eq!(toast.level, ToastLevel::Success);
        assert!(toast.extra.is_empty());
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["toastId"], Value::String(toast.toast_id.clone()));
    }

    #[rstest]
    #[case(r#"{"message": "a", "type": "info"}"#, ToastLevel::Info)]
    #[case(r#"{"message": "a", "type": "Warning"}"#, ToastLevel::Warning)]
    #[case(r#"{"message": "a", "type": "SOMETHING"}"#, ToastLevel::Info)]
    #[case(r#"{"message": "a", "type": 3}"#, ToastLevel::Info)]
    #[case(r#"{"message": "a"}"#, ToastLevel::Info)]
    fn test_toast_level_is_lenient(#[case] raw: &str, #[case] expected: ToastLevel) {
        let payload: ToastPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.level, expected);
    }

    #[rstest]
    fn test_toast_keeps_extra_fields() {
        let payload: ToastPayload =
            serde_json::from_str(r#"{"message": "a", "type": "INFO", "html": true}"#).unwrap();
        let toast = Toast::new(payload);
        assert_eq!(toast.extra.get("html"), Some(&Value::Bool(true)));
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["html"], Value::Bool(true));
        assert_eq!(json["type"], Value::String("INFO".to_string()));
    }

    #[rstest]
    fn test_message_keeps_extra_fields() {
        let raw = r#"{"id": "1", "text": "Bonjour", "group": {"id": "g1"}, "linkedEvent": null}"#;
        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.text, "Bonjour");
        assert!(message.extra.contains_key("linkedEvent"));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["group"]["id"], Value::String("g1".to_string()));
        assert!(json.get("recentComments").is_none());
    }

    #[rstest]
    #[case("INFO", ToastLevel::Info)]
    #[case("WARNING", ToastLevel::Warning)]
    fn test_toast_level_from_str(#[case] raw: &str, #[case] expected: ToastLevel) {
        assert_eq!(ToastLevel::from_str(raw).unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    fn test_user_reads_2022_flag() {
        let user: User = serde_json::from_str(r#"{"id": "u", "is2022": true}"#).unwrap();
        assert!(user.is_2022);
    }
}
