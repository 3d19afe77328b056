use std::sync::Arc;

use crate::router::{ DocumentTitle, Router, RouteTable, TitleFormat };

/// State shared by every worker: the route table never changes after startup.
pub struct Data {
    pub table: Arc<RouteTable>,
    pub title_format: TitleFormat,
}

impl Data {
    /// A fresh router per request, so no title state leaks between clients.
    pub fn router(&self) -> (Router, Arc<DocumentTitle>) {
        let title = Arc::new(DocumentTitle::new());
        let router = Router::new(self.table.clone(), title.clone(), self.title_format.clone());
        (router, title)
    }
}
