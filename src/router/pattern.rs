//! Path patterns in the `/editor/:id?` style.
//!
//! A pattern is a list of `/`-separated segments. A segment is either literal
//! text or a parameter: `:name`, optionally followed by a custom regex in
//! parentheses and a modifier (`?` optional, `*` zero or more segments, `+`
//! one or more segments). Literal text matches case-insensitively and a
//! trailing slash is always accepted.

use std::collections::BTreeMap;

use crate::error::{ Error, ErrorKind, Result };

use regex::Regex;

pub type Params = BTreeMap<String, String>;

const DEFAULT_SEGMENT: &str = "[^/]+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    One,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Repeat {
    fn is_optional(self) -> bool {
        self == Repeat::Optional || self == Repeat::ZeroOrMore
    }

    fn is_repeatable(self) -> bool {
        self == Repeat::ZeroOrMore || self == Repeat::OneOrMore
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Static(String),
    Param {
        name: String,
        base: String,
        repeat: Repeat,
        // Anchored check for a whole parameter value, used when building paths.
        value: Regex,
    },
}

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
    matcher: Regex,
}

impl Pattern {
    pub fn parse(source: &str) -> Result<Self> {
        if !source.starts_with('/') {
            return Err(Error::with_message(ErrorKind::RoutePattern, format!("`{}` must start with '/'", source)));
        }

        let mut segments = Vec::new();
        let mut names: Vec<String> = Vec::new();
        for raw in split_segments(&source[1..]) {
            if raw.is_empty() {
                continue;
            }
            if raw.starts_with(':') {
                let segment = parse_param(source, &raw[1..])?;
                if let Segment::Param { name, .. } = &segment {
                    if names.contains(name) {
                        return Err(Error::with_message(ErrorKind::RoutePattern, format!("`{}` declares `:{}` twice", source, name)));
                    }
                    names.push(name.clone());
                }
                segments.push(segment);
            } else {
                segments.push(Segment::Static(raw.to_owned()));
            }
        }

        let matcher = Regex::new(&matcher_source(&segments))
                            .map_err(|err| Error::with_message(ErrorKind::RoutePattern, format!("`{}`: {}", source, err)))?;

        Ok(Self {
            source: source.to_owned(),
            segments,
            matcher,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.segments
                .iter()
                .filter_map(|segment| match segment {
                    Segment::Param { name, .. } => Some(name.as_str()),
                    Segment::Static(_) => None,
                })
                .collect()
    }

    /// Matches a bare path (no query or hash) and returns the bound parameters.
    /// Optional parameters that did not match are left out of the map.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let caps = self.matcher.captures(path)?;
        let mut params = Params::new();
        for segment in &self.segments {
            if let Segment::Param { name, .. } = segment {
                if let Some(m) = caps.name(name) {
                    if !m.as_str().is_empty() {
                        params.insert(name.clone(), m.as_str().to_owned());
                    }
                }
            }
        }
        Some(params)
    }

    pub fn build(&self, params: &Params) -> Result<String> {
        let known = self.param_names();
        for key in params.keys() {
            if !known.contains(&key.as_str()) {
                log::warn!("Discarding parameter `{}` unknown to route `{}`", key, self.source);
            }
        }

        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => {
                    path.push('/');
                    path.push_str(text);
                },
                Segment::Param { name, repeat, value, .. } => {
                    match params.get(name).filter(|val| !val.is_empty()) {
                        Some(val) => {
                            if val.contains('?') || val.contains('#') || !value.is_match(val) {
                                return Err(Error::with_message(ErrorKind::RouteParam, format!("`{}` is not a valid value for `:{}` in `{}`", val, name, self.source)));
                            }
                            path.push('/');
                            path.push_str(val);
                        },
                        None if repeat.is_optional() => {},
                        None => {
                            return Err(Error::with_message(ErrorKind::RouteParam, format!("missing required parameter `:{}` for `{}`", name, self.source)));
                        },
                    }
                },
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

// Splits on '/' outside of parentheses so custom regexes may contain slashes.
fn split_segments(source: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;
    for (idx, c) in source.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                segments.push(&source[start..idx]);
                start = idx + 1;
            },
            _ => {},
        }
    }
    segments.push(&source[start..]);
    segments
}

fn parse_param(source: &str, body: &str) -> Result<Segment> {
    let name_len = body.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                        .unwrap_or_else(|| body.len());
    let name = &body[..name_len];
    if name.is_empty() {
        return Err(Error::with_message(ErrorKind::RoutePattern, format!("`{}` has a parameter without a name", source)));
    }

    let mut rest = &body[name_len..];
    let mut base = DEFAULT_SEGMENT.to_owned();
    if rest.starts_with('(') {
        let close = closing_paren(rest)
                        .ok_or_else(|| Error::with_message(ErrorKind::RoutePattern, format!("`{}` has an unclosed regex for `:{}`", source, name)))?;
        base = rest[1..close].to_owned();
        rest = &rest[close + 1..];
    }

    let repeat = match rest {
        "" => Repeat::One,
        "?" => Repeat::Optional,
        "*" => Repeat::ZeroOrMore,
        "+" => Repeat::OneOrMore,
        other => {
            return Err(Error::with_message(ErrorKind::RoutePattern, format!("`{}` has an unknown modifier `{}` on `:{}`", source, other, name)));
        },
    };

    let value = Regex::new(&format!("^(?:{})$", value_source(&base, repeat)))?;

    Ok(Segment::Param {
        name: name.to_owned(),
        base,
        repeat,
        value,
    })
}

fn closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            },
            _ => {},
        }
    }
    None
}

fn value_source(base: &str, repeat: Repeat) -> String {
    if repeat.is_repeatable() {
        format!("{b}(?:/{b})*", b = base)
    } else {
        base.to_owned()
    }
}

fn matcher_source(segments: &[Segment]) -> String {
    let mut re = String::from("(?i)^");
    for segment in segments {
        match segment {
            Segment::Static(text) => {
                re.push('/');
                re.push_str(&regex::escape(text));
            },
            Segment::Param { name, base, repeat, .. } => {
                let group = format!("(?P<{}>{})", name, value_source(base, *repeat));
                if repeat.is_optional() {
                    re.push_str(&format!("(?:/{})?", group));
                } else {
                    re.push('/');
                    re.push_str(&group);
                }
            },
        }
    }
    re.push_str("/?$");
    re
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn root_matches_only_root() {
        let pattern = Pattern::parse("/").unwrap();
        assert_eq!(pattern.match_path("/"), Some(Params::new()));
        assert_eq!(pattern.match_path(""), Some(Params::new()));
        assert_eq!(pattern.match_path("/generator"), None);
    }

    #[test]
    fn static_segments_ignore_case_and_trailing_slash() {
        let pattern = Pattern::parse("/generator").unwrap();
        assert!(pattern.match_path("/generator").is_some());
        assert!(pattern.match_path("/generator/").is_some());
        assert!(pattern.match_path("/Generator").is_some());
        assert!(pattern.match_path("/generators").is_none());
        assert!(pattern.match_path("/generator/x").is_none());
    }

    #[test]
    fn optional_param_binds_one_segment() {
        let pattern = Pattern::parse("/editor/:id?").unwrap();
        assert_eq!(pattern.match_path("/editor/42"), Some(params(&[("id", "42")])));
        assert_eq!(pattern.match_path("/editor/42/"), Some(params(&[("id", "42")])));
        assert_eq!(pattern.match_path("/editor"), Some(Params::new()));
        assert_eq!(pattern.match_path("/editor/"), Some(Params::new()));
        assert_eq!(pattern.match_path("/editor/42/extra"), None);
    }

    #[test]
    fn catch_all_matches_everything() {
        let pattern = Pattern::parse("/:pathMatch(.*)*").unwrap();
        assert_eq!(pattern.match_path("/a/b/c"), Some(params(&[("pathMatch", "a/b/c")])));
        assert_eq!(pattern.match_path("/"), Some(Params::new()));
    }

    #[test]
    fn custom_regex_may_contain_slashes() {
        let pattern = Pattern::parse("/files/:rest([^/]+)+").unwrap();
        assert_eq!(pattern.match_path("/files/a/b"), Some(params(&[("rest", "a/b")])));
        assert_eq!(pattern.match_path("/files"), None);
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        for source in &["editor", "/:", "/:id(", "/:id!", "/:a/:a"] {
            let err = Pattern::parse(source).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::RoutePattern, "{}", source);
        }
    }

    #[test]
    fn build_fills_and_skips_params() {
        let pattern = Pattern::parse("/editor/:id?").unwrap();
        assert_eq!(pattern.build(&params(&[("id", "42")])).unwrap(), "/editor/42");
        assert_eq!(pattern.build(&Params::new()).unwrap(), "/editor");
        assert_eq!(Pattern::parse("/").unwrap().build(&Params::new()).unwrap(), "/");
    }

    #[test]
    fn build_rejects_bad_values() {
        let optional = Pattern::parse("/editor/:id?").unwrap();
        assert_eq!(optional.build(&params(&[("id", "a/b")])).unwrap_err().kind(), &ErrorKind::RouteParam);
        assert_eq!(optional.build(&params(&[("id", "a?b")])).unwrap_err().kind(), &ErrorKind::RouteParam);

        let required = Pattern::parse("/palette/:id").unwrap();
        assert_eq!(required.build(&Params::new()).unwrap_err().kind(), &ErrorKind::RouteParam);
    }
}
