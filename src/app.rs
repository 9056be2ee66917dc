use std::sync::Arc;

use crate::environment::types::NavLink;
use crate::environment::InitialContext;
use crate::global_context::{selectors, Action, State, Store};
use crate::routes::{RouteConfig, RouteRegistry};

/// Configure `env_logger` from `RUST_LOG`, defaulting to `info`.
///
/// Calling it more than once is harmless.
pub fn init_logging() {
    use env_logger::Env;
    use std::io::Write;
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .try_init();
}

/// One route table and one store, as used by a page.
#[derive(Debug)]
pub struct App {
    routes: RouteRegistry,
    store: Store,
}

impl App {
    pub fn new(routes: RouteRegistry, context: InitialContext) -> Self {
        let mut store = Store::default();
        store.dispatch(Action::Init(context));
        Self { routes, store }
    }

    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn state(&self) -> Arc<State> {
        self.store.state()
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        self.store.dispatch(action)
    }

    /// Resolve `path` to its route and install the route's navigation links.
    pub fn navigate(&mut self, path: &str) -> Option<&RouteConfig> {
        let Some(route) = self.routes.get_route_by_pathname(path) else {
            log::debug!("no route for {path}");
            return None;
        };
        log::debug!("navigate to {} ({path})", route.id());
        let back_link = route.back_link().cloned();
        let top_bar_right_link = route.top_bar_right_link().cloned();
        self.store.dispatch(Action::SetBackLink { back_link });
        self.store.dispatch(Action::SetTopBarRightLink { top_bar_right_link });
        Some(route)
    }

    /// The href of `link`: explicit, a registered route, or a named href from the server.
    pub fn href(&self, link: &NavLink) -> Option<String> {
        if let Some(href) = self.routes.resolve_link(link) {
            return Some(href);
        }
        let name = link.route.as_deref()?;
        let state = self.store.state();
        selectors::get_route_by_id(&state, name).map(str::to_string)
    }
}
