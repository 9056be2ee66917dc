use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::pattern::PathPattern;
use super::RouteError;
use crate::environment::types::NavLink;

/// One canonical pattern, or a list of alternatives where the first is canonical.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum Pathname {
    One(String),
    Many(Vec<String>),
}

impl Pathname {
    pub fn canonical(&self) -> Option<&str> {
        match self {
            Pathname::One(p) => Some(p.as_str()),
            Pathname::Many(p) => p.first().map(String::as_str),
        }
    }

    pub fn all(&self) -> &[String] {
        match self {
            Pathname::One(p) => std::slice::from_ref(p),
            Pathname::Many(p) => p,
        }
    }
}

impl From<&str> for Pathname {
    fn from(value: &str) -> Self {
        Pathname::One(value.to_string())
    }
}

/// The static description of a route, as found in a route table.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    pub id: String,
    pub pathname: Pathname,
    pub exact: bool,
    pub label: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub back_link: Option<NavLink>,
    #[serde(default)]
    pub top_bar_right_link: Option<NavLink>,
    #[serde(default)]
    pub has_layout: bool,
    #[serde(default)]
    pub hide_feedback_button: bool,
}

impl RouteSpec {
    pub fn new(id: &str, pathname: impl Into<Pathname>, label: &str) -> Self {
        Self {
            id: id.to_string(),
            pathname: pathname.into(),
            exact: true,
            label: label.to_string(),
            params: Default::default(),
            back_link: None,
            top_bar_right_link: None,
            has_layout: false,
            hide_feedback_button: false,
        }
    }
}

/// A route descriptor with its compiled matcher and link builder.
///
/// The compiled patterns are built once from `spec.pathname` and the
/// descriptor is never mutated afterwards.
#[derive(Clone, Debug)]
pub struct RouteConfig {
    spec: RouteSpec,
    /// One pattern per alternative, the canonical one first
    patterns: Vec<PathPattern>,
}

impl RouteConfig {
    pub fn new(spec: RouteSpec) -> Result<Self, RouteError> {
        if spec.pathname.all().is_empty() {
            return Err(RouteError::EmptyPathname(spec.id));
        }
        let patterns = spec
            .pathname
            .all()
            .iter()
            .map(|p| PathPattern::new(p, spec.exact))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { spec, patterns })
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn pathname(&self) -> &Pathname {
        &self.spec.pathname
    }

    /// The pattern used for link generation.
    pub fn canonical_pattern(&self) -> &PathPattern {
        &self.patterns[0]
    }

    pub fn is_exact(&self) -> bool {
        self.spec.exact
    }

    pub fn default_params(&self) -> &HashMap<String, String> {
        &self.spec.params
    }

    pub fn back_link(&self) -> Option<&NavLink> {
        self.spec.back_link.as_ref()
    }

    pub fn top_bar_right_link(&self) -> Option<&NavLink> {
        self.spec.top_bar_right_link.as_ref()
    }

    pub fn has_layout(&self) -> bool {
        self.spec.has_layout
    }

    pub fn hide_feedback_button(&self) -> bool {
        self.spec.hide_feedback_button
    }

    pub(crate) fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }

    /// Whether `path` is one of the route's patterns, verbatim.
    pub fn is_pathname(&self, path: &str) -> bool {
        self.spec.pathname.all().iter().any(|p| p == path)
    }

    /// True iff `path` is non-empty and one of the patterns accepts it.
    pub fn matches(&self, path: &str) -> bool {
        !path.is_empty() && self.patterns.iter().any(|p| p.is_match(path))
    }

    /// Parameter values extracted from `path` by the first matching pattern.
    pub fn match_params(&self, path: &str) -> Option<HashMap<String, String>> {
        if path.is_empty() {
            return None;
        }
        self.patterns.iter().find_map(|p| p.captures(path))
    }

    /// Build a link, caller params override the route's default params.
    pub fn try_get_link<'a>(
        &self,
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<String, RouteError> {
        let mut merged = self.spec.params.clone();
        merged.extend(
            params
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        self.canonical_pattern().to_path(&merged)
    }

    /// Build a link, falling back to the raw canonical pattern on failure.
    pub fn get_link<'a>(&self, params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
        match self.try_get_link(params) {
            Ok(link) => link,
            Err(e) => {
                log::error!("Failed to generate path for route {}: {e}", self.spec.id);
                self.canonical_pattern().pattern().to_string()
            }
        }
    }

    /// The link with only the route's default params.
    pub fn link(&self) -> String {
        self.get_link(std::iter::empty())
    }
}

impl PartialEq for RouteConfig {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl Eq for RouteConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn event_details() -> RouteConfig {
        RouteConfig::new(RouteSpec::new(
            "eventDetails",
            "/evenements/:eventPk/",
            "Details de l'événement",
        ))
        .unwrap()
    }

    #[rstest]
    fn test_link_round_trip(event_details: RouteConfig) {
        let link = event_details.get_link([("eventPk", "abc")]);
        assert_eq!(link, "/evenements/abc/");
        assert!(event_details.matches(&link));
    }

    #[rstest]
    fn test_link_falls_back_to_pattern(event_details: RouteConfig) {
        assert_eq!(event_details.link(), "/evenements/:eventPk/");
        assert!(event_details.try_get_link(std::iter::empty()).is_err());
    }

    #[rstest]
    fn test_matches_rejects_empty_path() {
        let root = RouteConfig::new(RouteSpec::new("events", "/", "Événements")).unwrap();
        assert!(root.matches("/"));
        assert!(!root.matches(""));
    }

    #[rstest]
    fn test_default_params_are_overridden() {
        let mut spec = RouteSpec::new("groupDetails", "/groupes/:groupPk/:activeTab?/", "Groupe");
        spec.params.insert("activeTab".to_string(), "agenda".to_string());
        let route = RouteConfig::new(spec).unwrap();
        assert_eq!(route.get_link([("groupPk", "g1")]), "/groupes/g1/agenda/");
        assert_eq!(
            route.get_link([("groupPk", "g1"), ("activeTab", "messages")]),
            "/groupes/g1/messages/"
        );
    }

    #[rstest]
    fn test_alternative_pathnames() {
        let spec = RouteSpec::new(
            "activities",
            Pathname::Many(vec!["/activite/".to_string(), "/activites/".to_string()]),
            "Actualités",
        );
        let route = RouteConfig::new(spec).unwrap();
        assert!(route.matches("/activites/"));
        assert_eq!(route.link(), "/activite/");
        assert!(route.is_pathname("/activites/"));
    }

    #[rstest]
    fn test_empty_pathname_list() {
        let spec = RouteSpec::new("broken", Pathname::Many(vec![]), "Broken");
        assert_eq!(
            RouteConfig::new(spec).unwrap_err(),
            RouteError::EmptyPathname("broken".to_string())
        );
    }

    #[rstest]
    fn test_malformed_pattern_fails_construction() {
        let spec = RouteSpec::new("broken", "/evenements/:/", "Broken");
        assert!(matches!(
            RouteConfig::new(spec),
            Err(RouteError::InvalidParameter { .. })
        ));
    }

    #[rstest]
    fn test_match_params(event_details: RouteConfig) {
        let params = event_details.match_params("/evenements/xyz/").unwrap();
        assert_eq!(params.get("eventPk").map(String::as_str), Some("xyz"));
        assert_eq!(event_details.match_params(""), None);
    }
}
