//! Query-string and header-list helpers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is in query keys and values.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build a query string from key/value pairs.
///
/// Returns an empty string when there are no pairs, otherwise the pairs
/// joined with `&` behind a leading `?`.
///
/// # Example
///
/// ```
/// use sift_core::list_to_query;
///
/// assert_eq!(list_to_query([("q", "rust lang"), ("page", "2")]), "?q=rust%20lang&page=2");
/// assert_eq!(list_to_query::<_, &str, &str>([]), "");
/// ```
pub fn list_to_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key.as_ref(), QUERY_COMPONENT),
                utf8_percent_encode(value.as_ref(), QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}

/// Build a header list from name/value pairs, keeping order and duplicates.
///
/// # Example
///
/// ```
/// use sift_core::list_to_headers;
///
/// let headers = list_to_headers([("Accept", "application/json"), ("X-Tag", "a")]);
/// assert_eq!(headers[0], ("Accept".to_string(), "application/json".to_string()));
/// ```
pub fn list_to_headers<I, K, V>(pairs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}
