use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::NavLink;
use crate::error::Error;

/// The bootstrap context the server embeds in every page.
///
/// It is the payload of the `INIT` action.
#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitialContext {
    #[serde(default, deserialize_with = "crate::helper::deserialize_non_empty")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_truthy")]
    pub has_feedback_button: bool,
    /// Named hrefs the server knows about (login, logout, ...)
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient")]
    pub routes: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient")]
    pub back_link: Option<NavLink>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient")]
    pub top_bar_right_link: Option<NavLink>,
    #[serde(default, deserialize_with = "crate::helper::deserialize_lenient")]
    pub admin_link: Option<NavLink>,
}

impl InitialContext {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("reading initial context from {}", path.display());
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}
