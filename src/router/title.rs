use std::{
    sync::RwLock,
    collections::HashMap,
};

use crate::{
    config::RouterConfig,
    error::{ Error, ErrorKind, Result },
};

pub const DEFAULT_TEMPLATE: &str = "{title} | {app_name}";
pub const DEFAULT_APP_NAME: &str = "Vue Color Palette";
pub const DEFAULT_TITLE: &str = "Генератор цветовых палитр";

/// Where the router publishes the document title for the rendering host.
pub trait TitlePort: Send + Sync {
    fn set_title(&self, title: &str);
    fn title(&self) -> String;
}

#[derive(Debug, Default)]
pub struct DocumentTitle {
    value: RwLock<String>,
}

impl DocumentTitle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TitlePort for DocumentTitle {
    fn set_title(&self, title: &str) {
        let mut value = match self.value.write() {
            Ok(value) => value,
            Err(poisoned) => poisoned.into_inner(),
        };
        *value = title.to_owned();
    }

    fn title(&self) -> String {
        match self.value.read() {
            Ok(value) => value.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Builds page titles such as `Главная | Vue Color Palette`.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleFormat {
    template: String,
    app_name: String,
    default_title: String,
}

impl TitleFormat {
    pub fn new(template: &str, app_name: &str, default_title: &str) -> Result<Self> {
        let format = Self {
            template: template.to_owned(),
            app_name: app_name.to_owned(),
            default_title: default_title.to_owned(),
        };
        format.render(&format.default_title)
                .map_err(|err| Error::from(ErrorKind::TitleTemplate, err))?;
        Ok(format)
    }

    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        Self::new(&config.title_template, &config.app_name, &config.default_title)
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    /// Composes the page title, falling back to the default for a missing or
    /// empty route title.
    pub fn compose(&self, title: Option<&str>) -> String {
        let title = title.filter(|title| !title.is_empty())
                            .unwrap_or(&self.default_title);
        match self.render(title) {
            Ok(composed) => composed,
            Err(err) => {
                log::error!("Could not render title template `{}`: {}", self.template, err);
                format!("{} | {}", title, self.app_name)
            },
        }
    }

    fn render(&self, title: &str) -> std::result::Result<String, strfmt::FmtError> {
        let mut args = HashMap::new();
        args.insert("title".to_owned(), title.to_owned());
        args.insert("app_name".to_owned(), self.app_name.clone());
        strfmt::strfmt(&self.template, &args)
    }
}

impl Default for TitleFormat {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_owned(),
            app_name: DEFAULT_APP_NAME.to_owned(),
            default_title: DEFAULT_TITLE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_route_title_with_suffix() {
        let format = TitleFormat::default();
        assert_eq!(format.compose(Some("Главная")), "Главная | Vue Color Palette");
    }

    #[test]
    fn missing_or_empty_title_uses_default() {
        let format = TitleFormat::default();
        assert_eq!(format.compose(None), "Генератор цветовых палитр | Vue Color Palette");
        assert_eq!(format.compose(Some("")), "Генератор цветовых палитр | Vue Color Palette");
    }

    #[test]
    fn custom_template() {
        let format = TitleFormat::new("{app_name}: {title}", "Palettes", "Untitled").unwrap();
        assert_eq!(format.compose(Some("Export")), "Palettes: Export");
        assert_eq!(format.compose(None), "Palettes: Untitled");
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let err = TitleFormat::new("{title} | {version}", DEFAULT_APP_NAME, DEFAULT_TITLE).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::TitleTemplate);
    }

    #[test]
    fn document_title_is_shared() {
        let port = std::sync::Arc::new(DocumentTitle::new());
        let reader = port.clone();
        port.set_title("Экспорт палитры | Vue Color Palette");
        assert_eq!(reader.title(), "Экспорт палитры | Vue Color Palette");
    }
}
