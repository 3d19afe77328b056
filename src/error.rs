use std::{
    error, fmt,
    convert::From,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Other,
    ConfigurationRead,
    ConfigurationParse,
    Logging,
    LogFile,
    ParseWwwBaseUrl,
    TitleTemplate,
    RoutePattern,
    RouteName,
    RouteParam,
    RedirectLoop,
    IO,
    Serde,
}

#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            message: Self::type_to_str(&kind),
            kind,
        }
    }

    pub fn from<E>(kind: ErrorKind, err: E) -> Self
    where E: fmt::Display {
        let mut message = Self::type_to_str(&kind);
        if !message.is_empty() {
            message = format!("{}: {}", message, err);
        } else {
            message = format!("{}", err);
        }

        Self {
            kind,
            message,
        }
    }

    pub fn with_message<S>(kind: ErrorKind, details: S) -> Self
    where S: fmt::Display {
        Self::from(kind, details)
    }

    pub fn custom(message: &str) -> Self {
        Self {
            kind: ErrorKind::Other,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    fn type_to_str(kind: &ErrorKind) -> String {
        match kind {
            ErrorKind::Other | ErrorKind::IO => "",
            ErrorKind::ConfigurationRead => "could not read the configuration",
            ErrorKind::ConfigurationParse => "could not parse the configuration",
            ErrorKind::Logging => "could not setup logging",
            ErrorKind::LogFile => "could not write to log file",
            ErrorKind::ParseWwwBaseUrl => "could not parse www config base url",
            ErrorKind::TitleTemplate => "invalid document title template",
            ErrorKind::RoutePattern => "invalid route pattern",
            ErrorKind::RouteName => "invalid route name",
            ErrorKind::RouteParam => "invalid route parameter",
            ErrorKind::RedirectLoop => "too many redirects",
            ErrorKind::Serde => "could not serialize/deserialize JSON",
        }.into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        // Only the message of the underlying error is kept.
        None
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::from(ErrorKind::IO, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::from(ErrorKind::Serde, err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(_) | config::ConfigError::FileParse { .. } | config::ConfigError::Foreign(_) => {
                Self::from(ErrorKind::ConfigurationRead, err)
            },
            _ => Self::from(ErrorKind::ConfigurationParse, err),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::from(ErrorKind::RoutePattern, err)
    }
}
