//! Pagination query strings for list endpoints.

use std::fmt::Display;

use url::form_urlencoded::byte_serialize;

use crate::error::ApiError;

/// Keys the broker's list endpoints accept for pagination and filtering.
pub const PAGINATION_KEYS: [&str; 4] = ["page", "pageSize", "name", "use_regex"];

/// Build `?k=v&...&pagination=true` from filter options.
///
/// Returns an empty string when no options are given. Every key must be one
/// of `PAGINATION_KEYS`; the first unrecognized key fails the whole call and
/// no partial query is produced. Keys appear in the iteration order of
/// `options`.
pub fn build_pagination_query<I, K, V>(options: I) -> Result<String, ApiError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let mut pairs = Vec::new();
    for (key, value) in options {
        let key = key.as_ref();
        if !PAGINATION_KEYS.contains(&key) {
            return Err(ApiError::ValidationError(format!(
                "invalid key '{key}' in pagination"
            )));
        }
        pairs.push(format!("{}={}", escape(key), escape(&value.to_string())));
    }

    if pairs.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("?{}&pagination=true", pairs.join("&")))
}

fn escape(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}

/// Typed pagination options.
///
/// Keys are emitted in the fixed order page, pageSize, name, use_regex, so
/// the same options always produce the same query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub use_regex: Option<bool>,
}

impl Pagination {
    pub fn page(page: u32, page_size: u32) -> Self {
        Pagination {
            page: Some(page),
            page_size: Some(page_size),
            ..Pagination::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>, use_regex: bool) -> Self {
        self.name = Some(name.into());
        self.use_regex = Some(use_regex);
        self
    }

    pub fn to_query(&self) -> Result<String, ApiError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(use_regex) = self.use_regex {
            pairs.push(("use_regex", use_regex.to_string()));
        }
        build_pagination_query(pairs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;

    #[test]
    fn no_options_yield_empty_string() {
        let empty: HashMap<String, i32> = HashMap::new();
        assert_eq!(build_pagination_query(empty).unwrap(), "");
        assert_eq!(Pagination::default().to_query().unwrap(), "");
    }

    #[test]
    fn single_page_option() {
        let query = build_pagination_query([("page", 1)]).unwrap();
        assert!(query.starts_with("?page=1&"));
        assert!(query.ends_with("pagination=true"));
        assert_eq!(query, "?page=1&pagination=true");
    }

    #[test]
    fn unknown_key_fails_without_partial_output() {
        let err = build_pagination_query([("page", "1"), ("bogus", "1")]).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(ref msg) if msg.contains("bogus")));
    }

    #[test]
    fn hash_map_input_contains_every_pair() {
        let options: HashMap<&str, String> =
            HashMap::from([("page", "2".to_string()), ("pageSize", "50".to_string())]);
        let query = build_pagination_query(options).unwrap();
        assert!(query.starts_with('?'));
        assert!(query.contains("page=2"));
        assert!(query.contains("pageSize=50"));
        assert!(query.ends_with("&pagination=true"));
    }

    #[test]
    fn ordered_input_keeps_order() {
        let options = BTreeMap::from([("use_regex", "true"), ("name", "orders.*")]);
        assert_eq!(
            build_pagination_query(options).unwrap(),
            "?name=orders.*&use_regex=true&pagination=true"
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = build_pagination_query([("name", "a b&c=d/e")]).unwrap();
        assert_eq!(query, "?name=a+b%26c%3Dd%2Fe&pagination=true");
    }

    #[test]
    fn typed_pagination_has_fixed_order() {
        let query = Pagination::page(3, 100).named("^q", true).to_query().unwrap();
        assert_eq!(
            query,
            "?page=3&pageSize=100&name=%5Eq&use_regex=true&pagination=true"
        );
    }
}
