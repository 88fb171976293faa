//! Request DTOs for the image proxy API
//!
//! Defines the structure of incoming query strings.

use url::form_urlencoded;

/// Name of the query parameter carrying the upstream URL.
pub const URL_PARAM: &str = "url";

/// Query string for `GET /api/image-proxy`
///
/// # Fields
/// - `url`: Absolute URL of the upstream image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyQuery {
    /// Upstream image URL
    pub url: Option<String>,
}

impl ProxyQuery {
    /// Parses a raw query string, keeping the first `url` value.
    ///
    /// Repeated parameters and unrelated pairs are ignored, so parsing never
    /// fails.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let url = raw.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == URL_PARAM)
                .map(|(_, value)| value.into_owned())
        });
        Self { url }
    }

    /// Returns the upstream URL, treating an empty value as absent.
    ///
    /// The URL is otherwise passed through untouched; it is also the cache key.
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_present() {
        let query = ProxyQuery::from_raw(Some(
            "url=https%3A%2F%2Fimage.tmdb.org%2Ft%2Fp%2Fw342%2Fa.jpg",
        ));
        assert_eq!(query.target(), Some("https://image.tmdb.org/t/p/w342/a.jpg"));
    }

    #[test]
    fn test_target_missing() {
        assert_eq!(ProxyQuery::from_raw(None).target(), None);
        assert_eq!(ProxyQuery::from_raw(Some("")).target(), None);
        assert_eq!(ProxyQuery::from_raw(Some("size=w342")).target(), None);
    }

    #[test]
    fn test_target_empty_is_missing() {
        assert_eq!(ProxyQuery::from_raw(Some("url=")).target(), None);
        assert_eq!(ProxyQuery::from_raw(Some("url")).target(), None);
    }

    #[test]
    fn test_repeated_url_keeps_first() {
        let query = ProxyQuery::from_raw(Some(
            "url=https%3A%2F%2Fa.com%2Fx.jpg&url=https%3A%2F%2Fb.com%2Fy.jpg",
        ));
        assert_eq!(query.target(), Some("https://a.com/x.jpg"));
    }

    #[test]
    fn test_encoded_query_inside_target_survives() {
        let query = ProxyQuery::from_raw(Some(
            "other=1&url=https%3A%2F%2Fa.com%2Fx.jpg%3Fv%3D2%26s%3Dw500",
        ));
        assert_eq!(query.target(), Some("https://a.com/x.jpg?v=2&s=w500"));
    }
}
