use std::collections::HashSet;

use super::{
    location::Location,
    pattern::{ Params, Pattern },
    route::{ Resolution, ResolvedRoute, RouteRecord, RouteSummary, RouteTarget, View },
};
use crate::error::{ Error, ErrorKind, Result };

pub const HOME_PATH: &str = "/";

/// The palette application's routes, in matching order.
pub fn palette_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::view("/", "Home", View::Home)
            .with_title("Главная"),
        RouteRecord::view("/generator", "Generator", View::Generator)
            .with_title("Генератор палитр"),
        RouteRecord::view("/library", "Library", View::Library)
            .with_title("Библиотека палитр"),
        RouteRecord::view("/editor/:id?", "Editor", View::Editor)
            .with_props()
            .with_title("Редактор палитры"),
        RouteRecord::view("/export", "Export", View::Export)
            .with_title("Экспорт палитры"),
        RouteRecord::redirect("/:pathMatch(.*)*", HOME_PATH),
    ]
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    record: RouteRecord,
    pattern: Pattern,
}

/// Immutable, ordered route list. The first record whose pattern matches wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new(records: Vec<RouteRecord>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut routes = Vec::with_capacity(records.len());
        for record in records {
            if let Some(name) = &record.name {
                if !names.insert(name.clone()) {
                    return Err(Error::with_message(ErrorKind::RouteName, format!("route `{}` is declared twice", name)));
                }
            }
            let pattern = Pattern::parse(&record.path)?;
            routes.push(CompiledRoute { record, pattern });
        }
        Ok(Self { routes })
    }

    pub fn palette() -> Result<Self> {
        Self::new(palette_routes())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes.iter().map(|route| &route.record)
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.records().map(RouteSummary::from).collect()
    }

    pub fn resolve(&self, target: &str) -> Resolution {
        let location = Location::parse(target);
        let full_path = location.full_path();

        for route in &self.routes {
            let params = match route.pattern.match_path(&location.path) {
                Some(params) => params,
                None => continue,
            };

            return match &route.record.target {
                RouteTarget::Redirect(to) => {
                    log::debug!("{} matched `{}`, redirecting to {}", full_path, route.record.path, to);
                    Resolution::Redirect {
                        from: full_path,
                        to: to.clone(),
                    }
                },
                RouteTarget::View { view, props } => {
                    log::debug!("{} resolved to {}", full_path, view);
                    Resolution::Route(ResolvedRoute {
                        name: route.record.name.clone(),
                        view: *view,
                        path: location.path.clone(),
                        full_path,
                        props: if *props { params.clone() } else { Params::new() },
                        params,
                        query: location.query,
                        hash: location.hash,
                        meta: route.record.meta.clone(),
                    })
                },
            };
        }

        log::warn!("No route matches {}, redirecting to {}", full_path, HOME_PATH);
        Resolution::Redirect {
            from: full_path,
            to: HOME_PATH.to_owned(),
        }
    }

    pub fn path_for(&self, name: &str, params: &Params) -> Result<String> {
        let route = self.routes
                        .iter()
                        .find(|route| route.record.name.as_deref() == Some(name))
                        .ok_or_else(|| Error::with_message(ErrorKind::RouteName, format!("no route named `{}`", name)))?;
        route.pattern.build(params)
    }
}
