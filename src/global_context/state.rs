use crate::environment::types::{Message, NavLink, Toast, User};

pub const DEFAULT_DOMAIN: &str = "https://actionpopulaire.fr";

/// The global state tree.
///
/// Every field is a slice owned by the reducer of the same name. The tree is
/// never changed in place: the root reducer produces a new tree whenever a
/// slice changes. The `im` collections make those copies cheap.
#[derive(Clone, Eq, PartialEq)]
pub struct State {
    pub domain: String,
    pub has_feedback_button: bool,
    pub is_session_loaded: bool,
    pub is_2022: bool,
    pub feature_flags: im::HashMap<String, bool>,
    pub user: Option<User>,
    pub csrf_token: Option<String>,
    /// Named hrefs provided by the server, by name
    pub routes: im::HashMap<String, String>,
    pub toasts: im::Vector<Toast>,
    pub back_link: Option<NavLink>,
    pub top_bar_right_link: Option<NavLink>,
    pub admin_link: Option<NavLink>,
    pub messages: Messages,
    pub is_loading_messages: bool,
    pub is_updating_messages: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            has_feedback_button: false,
            is_session_loaded: false,
            is_2022: false,
            feature_flags: Default::default(),
            user: None,
            csrf_token: None,
            routes: Default::default(),
            toasts: Default::default(),
            back_link: None,
            top_bar_right_link: None,
            admin_link: None,
            messages: Default::default(),
            is_loading_messages: false,
            is_updating_messages: false,
        }
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("domain", &self.domain)
            .field("has_feedback_button", &self.has_feedback_button)
            .field("is_session_loaded", &self.is_session_loaded)
            .field("is_2022", &self.is_2022)
            .field("feature_flags", &self.feature_flags)
            .field("user", &self.user.as_ref().map(|e| &e.id))
            .field("csrf_token", &self.csrf_token.is_some())
            .field("routes", &self.routes.len())
            .field("toasts", &self.toasts.len())
            .field("back_link", &self.back_link)
            .field("top_bar_right_link", &self.top_bar_right_link)
            .field("admin_link", &self.admin_link)
            .field("messages", &self.messages.len())
            .field("is_loading_messages", &self.is_loading_messages)
            .field("is_updating_messages", &self.is_updating_messages)
            .finish()
    }
}

/// Loaded messages by id, in display order.
///
/// A `None` entry marks a deleted message, which is not the same as an
/// unknown id. Deleted messages keep their slot in the order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Messages {
    order: im::Vector<String>,
    entries: im::HashMap<String, Option<Message>>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Option<Message>> {
        self.entries.get(id)
    }

    /// Entries in display order, deleted ones included.
    pub fn values(&self) -> impl Iterator<Item = &Option<Message>> {
        self.order.iter().filter_map(move |id| self.entries.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Set the entry for `id` in place, appending it when the id is new.
    pub fn insert(&mut self, id: String, message: Option<Message>) {
        if !self.entries.contains_key(&id) {
            self.order.push_back(id.clone());
        }
        self.entries.insert(id, message);
    }

    /// Set the entry for `id` and move it to the front.
    pub fn insert_front(&mut self, id: String, message: Option<Message>) {
        if self.entries.contains_key(&id) {
            self.order.retain(|other| other != &id);
        }
        self.order.push_front(id.clone());
        self.entries.insert(id, message);
    }

    /// A copy with the entry for `id` set in place.
    pub fn update(&self, id: String, message: Option<Message>) -> Self {
        let mut next = self.clone();
        next.insert(id, message);
        next
    }
}

impl FromIterator<(String, Option<Message>)> for Messages {
    fn from_iter<I: IntoIterator<Item = (String, Option<Message>)>>(iter: I) -> Self {
        let mut messages = Self::new();
        for (id, message) in iter {
            messages.insert(id, message);
        }
        messages
    }
}
