//! URL building for API requests

use crate::error::{ClientError, ClientResult};
use url::Url;

/// Joins API paths and query strings onto the configured API root
pub struct UrlBuilder;

impl UrlBuilder {
    /// Append `segments` to `base_url`, percent-encoding each one.
    ///
    /// - `build("https://h/api/v1/", ["namespaces", "_", "actions"], [])` -> `https://h/api/v1/namespaces/_/actions`
    /// - `build("https://h/api/v1/", ["actions", "my action"], [])` -> `https://h/api/v1/actions/my%20action`
    pub fn build<S: AsRef<str>>(
        base_url: &str,
        segments: &[S],
        query: &[(String, String)],
    ) -> ClientResult<Url> {
        let mut url = Url::parse(base_url).map_err(|e| {
            ClientError::Config(format!("Invalid API URL '{}': {}", base_url, e))
        })?;

        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ClientError::Config(format!("API URL '{}' cannot be a base", base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_joins_segments() {
        let url = UrlBuilder::build(
            "https://whisk.example.com/api/v1/",
            &["namespaces", "_", "actions"],
            &[],
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://whisk.example.com/api/v1/namespaces/_/actions");
    }

    #[test]
    fn test_build_encodes_segments() {
        let url = UrlBuilder::build(
            "https://whisk.example.com/api/v1/",
            &["namespaces", "my ns", "actions", "pkg", "a?b"],
            &[],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://whisk.example.com/api/v1/namespaces/my%20ns/actions/pkg/a%3Fb"
        );
    }

    #[test]
    fn test_build_appends_query_in_order() {
        let query = vec![
            ("skip".to_string(), "10".to_string()),
            ("limit".to_string(), "5".to_string()),
        ];
        let url = UrlBuilder::build("http://localhost:3233/api/v1/", &["namespaces"], &query)
            .unwrap();
        assert_eq!(url.query(), Some("skip=10&limit=5"));
    }

    #[test]
    fn test_invalid_base() {
        assert!(UrlBuilder::build("not-a-url", &["x"], &[]).is_err());
        assert!(UrlBuilder::build("mailto:someone@example.com", &["x"], &[]).is_err());
    }
}
