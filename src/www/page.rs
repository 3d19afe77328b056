use super::Data;
use crate::{
    error::Result,
    router::{ Navigation, ResolvedRoute, ScrollPosition, TitlePort, HOME_PATH },
};

use actix_web::{
    web, HttpRequest, HttpResponse,
    http::{ header, Method },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Document {
        title: String,
        html: String,
    },
    Redirect(String),
}

pub fn render(data: &Data, target: &str) -> Result<Page> {
    let (mut router, title) = data.router();
    let transition = match router.push(target, ScrollPosition::TOP)? {
        Navigation::Completed(transition) => transition,
        Navigation::Aborted { .. } | Navigation::Duplicated { .. } => return Ok(Page::Redirect(HOME_PATH.to_owned())),
    };

    if transition.redirected_from.is_some() {
        return Ok(Page::Redirect(transition.to.full_path));
    }

    let title = title.title();
    let html = shell(&title, &transition.to)?;
    Ok(Page::Document { title, html })
}

fn shell(title: &str, route: &ResolvedRoute) -> Result<String> {
    // "</" would close the script element early
    let state = serde_json::to_string(route)?.replace("</", "<\\/");
    Ok(format!(
        "<!DOCTYPE html>
<html lang=\"ru\">
<head>
<meta charset=\"utf-8\">
<title>{}</title>
<link rel=\"stylesheet\" href=\"/assets/app.css\">
</head>
<body>
<div id=\"app\" data-view=\"{}\"></div>
<script id=\"route\" type=\"application/json\">{}</script>
<script src=\"/assets/app.js\"></script>
</body>
</html>
",
        escape_html(title),
        route.view,
        state,
    ))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn handler(req: HttpRequest, data: web::Data<Data>) -> HttpResponse {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return HttpResponse::MethodNotAllowed().finish();
    }

    let target = match req.uri().path_and_query() {
        Some(path_and_query) => path_and_query.as_str().to_owned(),
        None => req.path().to_owned(),
    };

    match render(&data, &target) {
        Ok(Page::Document { html, .. }) => {
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(html)
        },
        Ok(Page::Redirect(location)) => {
            HttpResponse::Found()
                .header(header::LOCATION, location)
                .finish()
        },
        Err(err) => {
            log::error!("Error while rendering {}: {}", target, err);
            HttpResponse::InternalServerError().finish()
        },
    }
}
