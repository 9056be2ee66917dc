use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;

use super::config::{RouteConfig, RouteSpec};
use super::pattern::Segment;
use super::RouteError;
use crate::environment::types::NavLink;
use crate::error::Error;

pub const BASE_PATH: &str = "/";

const BUILTIN_ROUTES: &str = include_str!("routes.json");

lazy_static::lazy_static! {
    /// The application route table. It is bundled with the crate, so a
    /// failure here is a broken build rather than a runtime condition.
    pub static ref ROUTES: RouteRegistry =
        RouteRegistry::builtin().expect("The bundled route table must be valid");
}

/// An insertion-ordered, immutable set of route descriptors.
#[derive(Clone, Debug)]
pub struct RouteRegistry {
    routes: Vec<RouteConfig>,
    index: HashMap<String, usize>,
}

impl RouteRegistry {
    /// Compile and validate a route table.
    ///
    /// Fails on malformed patterns, duplicate ids, and on any pair of
    /// patterns for which first-match-wins lookup would be ambiguous.
    pub fn new(specs: impl IntoIterator<Item = RouteSpec>) -> Result<Self, RouteError> {
        let mut routes = Vec::new();
        let mut index = HashMap::new();
        for spec in specs {
            if index.contains_key(&spec.id) {
                return Err(RouteError::DuplicateRoute(spec.id));
            }
            index.insert(spec.id.clone(), routes.len());
            routes.push(RouteConfig::new(spec)?);
        }
        validate_overlaps(&routes)?;
        log::debug!("compiled {} routes", routes.len());
        Ok(Self { routes, index })
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let specs: Vec<RouteSpec> = serde_json::from_str(json)?;
        Ok(Self::new(specs)?)
    }

    pub fn builtin() -> Result<Self, Error> {
        Self::from_json(BUILTIN_ROUTES)
    }

    pub fn get(&self, id: &str) -> Option<&RouteConfig> {
        self.index.get(id).map(|i| &self.routes[*i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteConfig> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The first route whose pathname is `path` verbatim, otherwise the
    /// first route matching `path`.
    pub fn get_route_by_pathname(&self, path: &str) -> Option<&RouteConfig> {
        self.routes
            .iter()
            .find(|route| route.is_pathname(path))
            .or_else(|| self.routes.iter().find(|route| route.matches(path)))
    }

    /// Link to the route `id`, `None` if no such route is registered.
    pub fn link<'a>(
        &self,
        id: &str,
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Option<String> {
        self.get(id).map(|route| route.get_link(params))
    }

    /// The href of a navigation link: its explicit href, or the link of the
    /// registered route it names.
    pub fn resolve_link(&self, link: &NavLink) -> Option<String> {
        if let Some(href) = &link.href {
            return Some(href.clone());
        }
        let route = link.route.as_deref()?;
        self.link(route, std::iter::empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    None,
    Identical,
    EarlierIsGeneral,
    LaterIsGeneral,
    Partial,
}

fn compare(
    earlier: &[Segment],
    earlier_exact: bool,
    later: &[Segment],
    later_exact: bool,
) -> Overlap {
    // a non-exact pattern also covers every path below it
    let (mut earlier_general, mut later_general) = match earlier.len().cmp(&later.len()) {
        Ordering::Equal => (
            !earlier_exact && later_exact,
            earlier_exact && !later_exact,
        ),
        Ordering::Less if !earlier_exact => (true, false),
        Ordering::Greater if !later_exact => (false, true),
        _ => return Overlap::None,
    };

    for pair in earlier.iter().zip(later) {
        match pair {
            (Segment::Literal(a), Segment::Literal(b)) if a != b => return Overlap::None,
            (Segment::Param, Segment::Literal(_)) => earlier_general = true,
            (Segment::Literal(_), Segment::Param) => later_general = true,
            _ => {}
        }
    }

    match (earlier_general, later_general) {
        (false, false) => Overlap::Identical,
        (true, false) => Overlap::EarlierIsGeneral,
        (false, true) => Overlap::LaterIsGeneral,
        (true, true) => Overlap::Partial,
    }
}

fn validate_overlaps(routes: &[RouteConfig]) -> Result<(), RouteError> {
    for (earlier, later) in routes.iter().tuple_combinations() {
        let pairs = earlier
            .patterns()
            .iter()
            .cartesian_product(later.patterns().iter());
        for (a, b) in pairs {
            for (va, vb) in a
                .segment_variants()
                .iter()
                .cartesian_product(b.segment_variants().iter())
            {
                match compare(va, a.is_exact(), vb, b.is_exact()) {
                    Overlap::None | Overlap::LaterIsGeneral => {}
                    Overlap::EarlierIsGeneral => {
                        return Err(RouteError::ShadowedRoute {
                            route: later.id().to_string(),
                            shadowed_by: earlier.id().to_string(),
                        })
                    }
                    Overlap::Identical | Overlap::Partial => {
                        return Err(RouteError::AmbiguousRoutes {
                            first: earlier.id().to_string(),
                            second: later.id().to_string(),
                        })
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> RouteRegistry {
        RouteRegistry::builtin().unwrap()
    }

    #[rstest]
    fn test_builtin_table(registry: RouteRegistry) {
        assert_eq!(registry.len(), 12);
        assert_eq!(registry.iter().next().map(|r| r.id()), Some("events"));
        let details = registry.get("eventDetails").unwrap();
        assert!(details.back_link().unwrap().is_protected);
        assert!(registry.get("groupMessage").unwrap().hide_feedback_button());
    }

    #[rstest]
    #[case("/", "events")]
    #[case("/evenements/carte/", "eventMap")]
    #[case("/evenements/creer/", "createEvent")]
    #[case("/evenements/abc/", "eventDetails")]
    #[case("/evenements/:eventPk/", "eventDetails")]
    #[case("/groupes/carte/", "groupMap")]
    #[case("/groupes/g1/complet/", "fullGroup")]
    #[case("/groupes/g1/messages/m1/", "groupMessage")]
    #[case("/groupes/g1/", "groupDetails")]
    #[case("/groupes/g1/agenda/", "groupDetails")]
    #[case("/a-traiter/", "requiredActivities")]
    fn test_get_route_by_pathname(
        registry: RouteRegistry,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            registry.get_route_by_pathname(path).map(|r| r.id()),
            Some(expected)
        );
    }

    #[rstest]
    #[case("")]
    #[case("/inconnu/")]
    #[case("/groupes/g1/messages/m1/extra/")]
    fn test_unknown_pathname(registry: RouteRegistry, #[case] path: &str) {
        assert!(registry.get_route_by_pathname(path).is_none());
    }

    #[rstest]
    fn test_link_and_resolve(registry: RouteRegistry) {
        assert_eq!(
            registry.link("eventDetails", [("eventPk", "e1")]).as_deref(),
            Some("/evenements/e1/")
        );
        assert_eq!(registry.link("nope", std::iter::empty()), None);
        assert_eq!(
            registry.resolve_link(&NavLink::route("groups", "Groupes")).as_deref(),
            Some("/mes-groupes/")
        );
        let external = NavLink {
            href: Some("https://example.org/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            registry.resolve_link(&external).as_deref(),
            Some("https://example.org/")
        );
    }

    #[rstest]
    fn test_duplicate_ids() {
        let specs = vec![
            RouteSpec::new("a", "/a/", "A"),
            RouteSpec::new("a", "/b/", "B"),
        ];
        assert_eq!(
            RouteRegistry::new(specs).unwrap_err(),
            RouteError::DuplicateRoute("a".to_string())
        );
    }

    #[rstest]
    fn test_identical_patterns_are_ambiguous() {
        let specs = vec![
            RouteSpec::new("event", "/evenements/:eventPk/", "A"),
            RouteSpec::new("other", "/Evenements/:pk", "B"),
        ];
        assert_eq!(
            RouteRegistry::new(specs).unwrap_err(),
            RouteError::AmbiguousRoutes {
                first: "event".to_string(),
                second: "other".to_string()
            }
        );
    }

    #[rstest]
    fn test_general_before_specific_is_shadowing() {
        let specs = vec![
            RouteSpec::new("eventDetails", "/evenements/:eventPk/", "A"),
            RouteSpec::new("eventMap", "/evenements/carte/", "B"),
        ];
        assert_eq!(
            RouteRegistry::new(specs).unwrap_err(),
            RouteError::ShadowedRoute {
                route: "eventMap".to_string(),
                shadowed_by: "eventDetails".to_string()
            }
        );
    }

    #[rstest]
    fn test_optional_segment_overlap() {
        let specs = vec![
            RouteSpec::new("groupDetails", "/groupes/:groupPk/:activeTab?/", "A"),
            RouteSpec::new("fullGroup", "/groupes/:groupPk/complet/", "B"),
        ];
        assert!(matches!(
            RouteRegistry::new(specs),
            Err(RouteError::ShadowedRoute { .. })
        ));
    }

    #[rstest]
    fn test_crossed_params_are_ambiguous() {
        let specs = vec![
            RouteSpec::new("a", "/:x/fixe/", "A"),
            RouteSpec::new("b", "/fixe/:y/", "B"),
        ];
        assert!(matches!(
            RouteRegistry::new(specs),
            Err(RouteError::AmbiguousRoutes { .. })
        ));
    }

    #[rstest]
    fn test_non_exact_prefix_shadows_deeper_routes() {
        let specs = vec![
            RouteSpec {
                exact: false,
                ..RouteSpec::new("groups", "/groupes/", "A")
            },
            RouteSpec::new("groupMap", "/groupes/carte/", "B"),
        ];
        assert!(matches!(
            RouteRegistry::new(specs),
            Err(RouteError::ShadowedRoute { .. })
        ));
    }

    #[rstest]
    fn test_from_json_rejects_bad_table() {
        let result = RouteRegistry::from_json(
            r#"[{"id": "x", "pathname": "nope", "exact": true, "label": "X"}]"#,
        );
        assert!(matches!(
            result,
            Err(Error::Route(RouteError::MissingLeadingSlash(_)))
        ));
        assert!(matches!(
            RouteRegistry::from_json("{}"),
            Err(Error::Json(_))
        ));
    }

    #[rstest]
    fn test_static_table() {
        assert!(ROUTES.get("menu").is_some());
        assert_eq!(BASE_PATH, ROUTES.get("events").unwrap().link());
    }
}
