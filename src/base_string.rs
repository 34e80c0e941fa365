use std::collections::BTreeMap;

use reqwest::{Method, Url};

use crate::percent_encode;

/// Builds the signature base string (RFC 5849 3.4.1.1):
/// `METHOD&encoded base URI&encoded parameter string`.
///
/// `params` must not contain `oauth_signature`.
pub fn signature_base(method: &Method, url: &Url, params: &BTreeMap<String, String>) -> String {
    let method = method.as_str().to_uppercase();
    let base_uri = base_uri(url);
    let parameter_string = normalized_parameter_string(params);
    let base = [
        method,
        percent_encode(&base_uri),
        percent_encode(&parameter_string),
    ]
    .join("&");
    tracing::trace!(base_string = %base, "computed signature base string");
    base
}

/// Base string URI (RFC 5849 3.4.1.2). Scheme and host are lowercase, a
/// default port (80 for http, 443 for https) is dropped, the query is left
/// out and the path is kept as it was escaped in the URL.
///
/// An empty path is `/`, the request-target reqwest sends for it.
pub fn base_uri(url: &Url) -> String {
    let scheme = url.scheme().to_ascii_lowercase();
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let port = match (scheme.as_str(), url.port()) {
        ("http", Some(80)) | ("https", Some(443)) | (_, None) => String::new(),
        (_, Some(port)) => format!(":{}", port),
    };
    format!("{}://{}{}{}", scheme, host, port, url.path())
}

/// Parameter string (RFC 5849 3.4.1.3.2): keys and values percent encoded,
/// sorted by encoded key, joined as `key=value` pairs with `&`.
pub fn normalized_parameter_string(params: &BTreeMap<String, String>) -> String {
    sorted_pairs(params, |key, value| format!("{}={}", key, value)).join("&")
}

/// Percent encodes every key and value, then renders the pairs ordered by
/// encoded key.
pub(crate) fn sorted_pairs<F>(params: &BTreeMap<String, String>, render: F) -> Vec<String>
where
    F: Fn(&str, &str) -> String,
{
    let encoded: BTreeMap<String, String> = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    encoded
        .iter()
        .map(|(key, value)| render(key, value))
        .collect()
}
