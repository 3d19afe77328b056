//! Client-side navigation: route resolution, the `before_each` guard
//! pipeline, session history and scroll restoration.

pub mod history;
pub mod location;
pub mod pattern;
pub mod route;
pub mod table;
pub mod title;

pub use history::{ History, HistoryEntry, ScrollPosition };
pub use location::Location;
pub use pattern::{ Params, Pattern };
pub use route::{ Resolution, ResolvedRoute, RouteMeta, RouteRecord, RouteSummary, RouteTarget, View };
pub use table::{ palette_routes, RouteTable, HOME_PATH };
pub use title::{ DocumentTitle, TitleFormat, TitlePort };

use std::sync::Arc;

use crate::error::{ Error, ErrorKind, Result };

/// Redirects followed by a single navigation before giving up.
pub const MAX_REDIRECTS: usize = 5;

/// What a guard wants done with a pending transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Continue,
    Redirect(String),
    Abort,
}

pub trait NavigationGuard: Send + Sync {
    fn before_each(&self, to: &ResolvedRoute, from: Option<&ResolvedRoute>) -> Decision;
}

impl<F> NavigationGuard for F
where F: Fn(&ResolvedRoute, Option<&ResolvedRoute>) -> Decision + Send + Sync {
    fn before_each(&self, to: &ResolvedRoute, from: Option<&ResolvedRoute>) -> Decision {
        self(to, from)
    }
}

/// Writes the composed page title to the title port before every transition.
pub struct TitleGuard {
    port: Arc<dyn TitlePort>,
    format: TitleFormat,
}

impl TitleGuard {
    pub fn new(port: Arc<dyn TitlePort>, format: TitleFormat) -> Self {
        Self {
            port,
            format,
        }
    }
}

impl NavigationGuard for TitleGuard {
    fn before_each(&self, to: &ResolvedRoute, _from: Option<&ResolvedRoute>) -> Decision {
        self.port.set_title(&self.format.compose(to.title()));
        Decision::Continue
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: Option<ResolvedRoute>,
    pub to: ResolvedRoute,
    pub scroll: ScrollPosition,
    /// First location of the request when it was redirected on the way.
    pub redirected_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Completed(Transition),
    Aborted {
        to: String,
    },
    /// The target is already the current location; nothing ran.
    Duplicated {
        to: String,
    },
}

impl Navigation {
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Navigation::Completed(transition) => Some(transition),
            Navigation::Aborted { .. } | Navigation::Duplicated { .. } => None,
        }
    }
}

enum Outcome {
    Accepted {
        route: ResolvedRoute,
        redirected_from: Option<String>,
    },
    Aborted {
        to: String,
    },
    Duplicated {
        to: String,
    },
}

pub struct Router {
    table: Arc<RouteTable>,
    title: Arc<dyn TitlePort>,
    // Runs after every other guard has let the transition through.
    title_guard: TitleGuard,
    guards: Vec<Box<dyn NavigationGuard>>,
    history: History,
    current: Option<ResolvedRoute>,
}

impl Router {
    pub fn new(table: Arc<RouteTable>, title: Arc<dyn TitlePort>, format: TitleFormat) -> Self {
        Self {
            table,
            title: title.clone(),
            title_guard: TitleGuard::new(title, format),
            guards: Vec::new(),
            history: History::new(),
            current: None,
        }
    }

    pub fn before_each<G>(&mut self, guard: G)
    where G: NavigationGuard + 'static {
        self.guards.push(Box::new(guard));
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    pub fn title(&self) -> String {
        self.title.title()
    }

    pub fn resolve(&self, target: &str) -> Resolution {
        self.table.resolve(target)
    }

    pub fn path_for(&self, name: &str, params: &Params) -> Result<String> {
        self.table.path_for(name, params)
    }

    /// Saved position for back/forward, otherwise the top of the document.
    pub fn scroll_position(saved: Option<ScrollPosition>) -> ScrollPosition {
        saved.unwrap_or(ScrollPosition::TOP)
    }

    pub fn push(&mut self, target: &str, current_scroll: ScrollPosition) -> Result<Navigation> {
        match self.run_pipeline(target, false)? {
            Outcome::Aborted { to } => Ok(Navigation::Aborted { to }),
            Outcome::Duplicated { to } => Ok(Navigation::Duplicated { to }),
            Outcome::Accepted { route, redirected_from } => {
                self.history.save_scroll(current_scroll);
                self.history.push(route.full_path.clone());
                Ok(self.commit(route, redirected_from, Self::scroll_position(None)))
            },
        }
    }

    pub fn push_named(&mut self, name: &str, params: &Params, current_scroll: ScrollPosition) -> Result<Navigation> {
        let path = self.table.path_for(name, params)?;
        self.push(&path, current_scroll)
    }

    /// Like `push`, but overwrites the current entry. Its saved scroll
    /// position goes with it.
    pub fn replace(&mut self, target: &str) -> Result<Navigation> {
        match self.run_pipeline(target, false)? {
            Outcome::Aborted { to } => Ok(Navigation::Aborted { to }),
            Outcome::Duplicated { to } => Ok(Navigation::Duplicated { to }),
            Outcome::Accepted { route, redirected_from } => {
                self.history.replace(route.full_path.clone());
                Ok(self.commit(route, redirected_from, Self::scroll_position(None)))
            },
        }
    }

    pub fn back(&mut self, current_scroll: ScrollPosition) -> Result<Option<Navigation>> {
        self.go(-1, current_scroll)
    }

    pub fn forward(&mut self, current_scroll: ScrollPosition) -> Result<Option<Navigation>> {
        self.go(1, current_scroll)
    }

    /// Moves `delta` entries through history. Returns `None` when there is no
    /// such entry.
    pub fn go(&mut self, delta: isize, current_scroll: ScrollPosition) -> Result<Option<Navigation>> {
        let index = match self.history.offset(delta) {
            Some(index) => index,
            None => return Ok(None),
        };
        let location = match self.history.entry(index) {
            Some(entry) => entry.location.clone(),
            None => return Ok(None),
        };

        match self.run_pipeline(&location, true)? {
            Outcome::Aborted { to } => Ok(Some(Navigation::Aborted { to })),
            Outcome::Duplicated { to } => Ok(Some(Navigation::Duplicated { to })),
            Outcome::Accepted { route, redirected_from } => {
                self.history.save_scroll(current_scroll);
                let saved = self.history.move_to(index);
                let scroll = if redirected_from.is_some() {
                    self.history.replace(route.full_path.clone());
                    Self::scroll_position(None)
                } else {
                    Self::scroll_position(saved)
                };
                Ok(Some(self.commit(route, redirected_from, scroll)))
            },
        }
    }

    fn commit(&mut self, route: ResolvedRoute, redirected_from: Option<String>, scroll: ScrollPosition) -> Navigation {
        let from = self.current.replace(route.clone());
        Navigation::Completed(Transition {
            from,
            to: route,
            scroll,
            redirected_from,
        })
    }

    fn run_pipeline(&self, target: &str, allow_same: bool) -> Result<Outcome> {
        let mut target = target.to_owned();
        let mut redirected_from: Option<String> = None;

        for _ in 0..=MAX_REDIRECTS {
            let route = match self.table.resolve(&target) {
                Resolution::Route(route) => route,
                Resolution::Redirect { from, to } => {
                    redirected_from.get_or_insert(from);
                    target = to;
                    continue;
                },
            };

            if !allow_same && self.current.as_ref().map(|current| &current.full_path) == Some(&route.full_path) {
                log::debug!("Already at {}", route.full_path);
                return Ok(Outcome::Duplicated { to: route.full_path });
            }

            match self.run_guards(&route) {
                Decision::Continue => return Ok(Outcome::Accepted { route, redirected_from }),
                Decision::Redirect(to) => {
                    log::debug!("Guard redirected {} to {}", route.full_path, to);
                    redirected_from.get_or_insert(route.full_path);
                    target = to;
                },
                Decision::Abort => {
                    log::info!("Navigation to {} was aborted", route.full_path);
                    return Ok(Outcome::Aborted { to: route.full_path });
                },
            }
        }

        Err(Error::with_message(ErrorKind::RedirectLoop, format!("gave up after {} redirects, last target was {}", MAX_REDIRECTS, target)))
    }

    fn run_guards(&self, to: &ResolvedRoute) -> Decision {
        for guard in &self.guards {
            match guard.before_each(to, self.current.as_ref()) {
                Decision::Continue => {},
                decision => return decision,
            }
        }
        self.title_guard.before_each(to, self.current.as_ref())
    }
}
