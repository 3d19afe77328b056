use std::{
    path::PathBuf,
    collections::HashMap,
};

use crate::{
    error::{ Error, ErrorKind, Result },
    router::title::{ DEFAULT_APP_NAME, DEFAULT_TEMPLATE, DEFAULT_TITLE },
};

use serde::{ Serialize, Deserialize, Deserializer };

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub www: WwwConfig,
    pub router: RouterConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::base()?;
        cfg
            .merge(config::File::with_name("config").required(false))?
            .merge(config::Environment::with_prefix("PALETTE_ROUTER").separator("__"))?;
        let mut cfg: Config = cfg.try_into()?;

        if let Ok(port) = std::env::var("PORT") {
            // Heroku web port
            cfg.www.bind_port = port.parse()
                                        .map_err(|err| Error::from(ErrorKind::ConfigurationParse, err))?;
        }

        cfg.www.format_base_url()?;

        Ok(cfg)
    }

    /// Built-in settings only, without the config file or environment.
    pub fn defaults() -> Result<Self> {
        let mut cfg: Config = Self::base()?.try_into()?;
        cfg.www.format_base_url()?;
        Ok(cfg)
    }

    fn base() -> Result<config::Config> {
        let mut cfg = config::Config::default();
        cfg
            .set_default("logging.level", "info")?
            .set_default("www.bind_host", "127.0.0.1")?
            .set_default("www.bind_port", 8080i64)?
            .set_default("www.base_url", "http://localhost:{port}")?
            .set_default("www.workers", 2i64)?
            .set_default("www.assets_dir", "assets")?
            .set_default("router.app_name", DEFAULT_APP_NAME)?
            .set_default("router.default_title", DEFAULT_TITLE)?
            .set_default("router.title_template", DEFAULT_TEMPLATE)?;
        Ok(cfg)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if pretty {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(serde_json::to_string(self)?)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    #[serde(deserialize_with = "deserialize_level")]
    pub level: log::LevelFilter,
}

// `LevelFilter`'s own impl only knows the upper-case variant names.
fn deserialize_level<'de, D>(deserializer: D) -> std::result::Result<log::LevelFilter, D::Error>
where D: Deserializer<'de> {
    let level = String::deserialize(deserializer)?;
    level.parse().map_err(|_| serde::de::Error::custom(format!("unknown log level `{}`", level)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WwwConfig {
    pub bind_host: String,
    pub bind_port: u16,
    pub base_url: String,
    pub workers: usize,
    pub assets_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub app_name: String,
    pub default_title: String,
    pub title_template: String,
}

impl WwwConfig {
    pub fn format_base_url(&mut self) -> Result<()> {
        let mut args = HashMap::new();
        args.insert("port".into(), format!("{}", self.bind_port));

        self.base_url = strfmt::strfmt(&self.base_url, &args).map_err(|err| Error::from(ErrorKind::ParseWwwBaseUrl, err))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_palette_app() {
        let cfg = Config::defaults().unwrap();
        assert_eq!(cfg.logging.level, log::LevelFilter::Info);
        assert_eq!(cfg.logging.file, None);
        assert_eq!(cfg.www.bind_port, 8080);
        assert_eq!(cfg.www.base_url, "http://localhost:8080");
        assert_eq!(cfg.router.app_name, "Vue Color Palette");
        assert_eq!(cfg.router.default_title, "Генератор цветовых палитр");
        assert_eq!(cfg.router.title_template, "{title} | {app_name}");
    }

    #[test]
    fn log_level_ignores_case() {
        for (raw, expected) in &[("debug", log::LevelFilter::Debug), ("WARN", log::LevelFilter::Warn), ("Off", log::LevelFilter::Off)] {
            let json = format!("{{\"file\":null,\"level\":\"{}\"}}", raw);
            let logging: LoggingConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(logging.level, *expected);
        }
        assert!(serde_json::from_str::<LoggingConfig>("{\"file\":null,\"level\":\"loud\"}").is_err());
    }

    #[test]
    fn base_url_takes_the_port() {
        let mut www = Config::defaults().unwrap().www;
        www.bind_port = 3000;
        www.base_url = "https://palettes.example:{port}/app".into();
        www.format_base_url().unwrap();
        assert_eq!(www.base_url, "https://palettes.example:3000/app");
    }

    #[test]
    fn bad_base_url_template() {
        let mut www = Config::defaults().unwrap().www;
        www.base_url = "http://localhost:{host}".into();
        assert_eq!(www.format_base_url().unwrap_err().kind(), &ErrorKind::ParseWwwBaseUrl);
    }

    #[test]
    fn serializes_to_json() {
        let json = Config::defaults().unwrap().to_json(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["router"]["app_name"], "Vue Color Palette");
    }
}
