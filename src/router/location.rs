use std::collections::BTreeMap;

use serde::{ Serialize, Deserialize };

pub type Query = BTreeMap<String, String>;

/// A navigation target split into its path, query and hash parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub query: Query,
    /// Query string as written, without the leading `?`.
    pub search: String,
    pub hash: Option<String>,
}

impl Location {
    pub fn parse(target: &str) -> Self {
        let (rest, hash) = match target.find('#') {
            Some(idx) => (&target[..idx], Some(target[idx + 1..].to_owned())),
            None => (target, None),
        };
        let (path, search) = match rest.find('?') {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => (rest, ""),
        };

        let path = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{}", path)
        };

        Self {
            path,
            query: parse_query(search),
            search: search.to_owned(),
            hash: hash.filter(|hash| !hash.is_empty()),
        }
    }

    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.search.is_empty() {
            full.push('?');
            full.push_str(&self.search);
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

fn parse_query(query: &str) -> Query {
    let mut parsed = Query::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        match pair.find('=') {
            Some(idx) => parsed.insert(pair[..idx].to_owned(), pair[idx + 1..].to_owned()),
            None => parsed.insert(pair.to_owned(), String::new()),
        };
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_query_and_hash() {
        let location = Location::parse("/library?sort=name&page=2#top");
        assert_eq!(location.path, "/library");
        assert_eq!(location.query.get("sort").map(String::as_str), Some("name"));
        assert_eq!(location.query.get("page").map(String::as_str), Some("2"));
        assert_eq!(location.hash.as_deref(), Some("top"));
        assert_eq!(location.full_path(), "/library?sort=name&page=2#top");
    }

    #[test]
    fn relative_and_empty_targets_become_absolute() {
        assert_eq!(Location::parse("generator").path, "/generator");
        assert_eq!(Location::parse("").path, "/");
        assert_eq!(Location::parse("?a").path, "/");
    }

    #[test]
    fn bare_keys_and_duplicates() {
        let location = Location::parse("/export?raw&fmt=css&fmt=json");
        assert_eq!(location.query.get("raw").map(String::as_str), Some(""));
        assert_eq!(location.query.get("fmt").map(String::as_str), Some("json"));
        assert_eq!(location.full_path(), "/export?raw&fmt=css&fmt=json");
    }

    #[test]
    fn full_path_keeps_query_order() {
        assert_eq!(Location::parse("/library?b=1&a=2").full_path(), "/library?b=1&a=2");
        assert_eq!(Location::parse("/library?").full_path(), "/library");
    }
}
