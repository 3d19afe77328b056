use std::fmt;

use super::{
    location::Query,
    pattern::Params,
};

use serde::{ Serialize, Deserialize };

/// Views the rendering host knows how to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Home,
    Generator,
    Library,
    Editor,
    Export,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Generator => "Generator",
            View::Library => "Library",
            View::Editor => "Editor",
            View::Export => "Export",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMeta {
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteTarget {
    View {
        view: View,
        // Forward bound path params to the view as props
        props: bool,
    },
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub target: RouteTarget,
    pub meta: RouteMeta,
}

impl RouteRecord {
    pub fn view(path: &str, name: &str, view: View) -> Self {
        Self {
            path: path.to_owned(),
            name: Some(name.to_owned()),
            target: RouteTarget::View { view, props: false },
            meta: RouteMeta::default(),
        }
    }

    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_owned(),
            name: None,
            target: RouteTarget::Redirect(to.to_owned()),
            meta: RouteMeta::default(),
        }
    }

    pub fn with_props(mut self) -> Self {
        if let RouteTarget::View { props, .. } = &mut self.target {
            *props = true;
        }
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.meta.title = Some(title.to_owned());
        self
    }
}

/// Flat, serializable view of a route record for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub path: String,
    pub name: Option<String>,
    pub view: Option<View>,
    pub props: bool,
    pub title: Option<String>,
    pub redirect: Option<String>,
}

impl From<&RouteRecord> for RouteSummary {
    fn from(record: &RouteRecord) -> Self {
        let (view, props, redirect) = match &record.target {
            RouteTarget::View { view, props } => (Some(*view), *props, None),
            RouteTarget::Redirect(to) => (None, false, Some(to.clone())),
        };

        Self {
            path: record.path.clone(),
            name: record.name.clone(),
            view,
            props,
            title: record.meta.title.clone(),
            redirect,
        }
    }
}

/// A path that matched a view route, with everything bound from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    pub name: Option<String>,
    pub view: View,
    pub path: String,
    pub full_path: String,
    pub params: Params,
    /// Params forwarded to the view; empty unless the route forwards props.
    pub props: Params,
    pub query: Query,
    pub hash: Option<String>,
    pub meta: RouteMeta,
}

impl ResolvedRoute {
    pub fn id(&self) -> Option<&str> {
        self.props.get("id").map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Route(ResolvedRoute),
    Redirect {
        from: String,
        to: String,
    },
}

impl Resolution {
    pub fn route(&self) -> Option<&ResolvedRoute> {
        match self {
            Resolution::Route(route) => Some(route),
            Resolution::Redirect { .. } => None,
        }
    }
}
