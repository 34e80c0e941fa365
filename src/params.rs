use std::collections::BTreeMap;

use reqwest::Request;

use crate::{form, OAuthParameters, SignError, SignResult};

/// Collects the parameters that take part in the signature (RFC 5849
/// 3.4.1.3): URL query, then a form encoded body, then the OAuth protocol
/// parameters, each source overwriting keys already collected.
///
/// Duplicate keys are not supported. Within one source only the first value
/// of a key is kept.
///
/// The body is only borrowed, so it is still there when the request is sent.
pub(crate) fn collect_parameters(
    request: &Request,
    oauth_params: &OAuthParameters,
) -> SignResult<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();

    if let Some(query) = request.url().query() {
        let pairs = form::parse(query.as_bytes()).map_err(SignError::MalformedQuery)?;
        params.extend(form::first_values(pairs));
    }

    if let Some(body) = request.body() {
        if form::is_form_encoded(request.headers()) {
            let bytes = body.as_bytes().ok_or(SignError::UnreplayableBody)?;
            let pairs = form::parse(bytes).map_err(SignError::MalformedBody)?;
            params.extend(form::first_values(pairs));
        }
    }

    for (key, value) in oauth_params {
        params.insert(key.clone(), value.clone());
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use http::header::{HeaderValue, CONTENT_TYPE};
    use reqwest::{Body, Method, Url};

    use super::*;
    use crate::{FormError, FORM_CONTENT_TYPE};

    fn request(method: Method, url: &str, body: Option<&'static str>, form: bool) -> Request {
        let mut request = Request::new(method, Url::parse(url).unwrap());
        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(body));
        }
        if form {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }
        request
    }

    fn oauth(pairs: &[(&str, &str)]) -> OAuthParameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn merges_query_body_and_oauth() {
        let req = request(
            Method::POST,
            "https://example.com/r?a=1&shared=query",
            Some("b=2&shared=body"),
            true,
        );
        let params = collect_parameters(&req, &oauth(&[("oauth_nonce", "n")])).unwrap();
        assert_eq!(params.len(), 4);
        assert_eq!(params["a"], "1");
        assert_eq!(params["b"], "2");
        assert_eq!(params["shared"], "body");
        assert_eq!(params["oauth_nonce"], "n");
    }

    #[test]
    fn oauth_params_overwrite_collisions() {
        let req = request(Method::GET, "https://example.com/r?oauth_nonce=query", None, false);
        let params = collect_parameters(&req, &oauth(&[("oauth_nonce", "fresh")])).unwrap();
        assert_eq!(params["oauth_nonce"], "fresh");
    }

    #[test]
    fn keeps_first_duplicate_value() {
        let req = request(Method::POST, "https://example.com/r?q=1&q=2", Some("f=x&f=y"), true);
        let params = collect_parameters(&req, &OAuthParameters::new()).unwrap();
        assert_eq!(params["q"], "1");
        assert_eq!(params["f"], "x");
    }

    #[test]
    fn ignores_body_without_exact_form_content_type() {
        let mut req = request(Method::POST, "https://example.com/r", Some("b=2"), false);
        assert!(collect_parameters(&req, &OAuthParameters::new())
            .unwrap()
            .is_empty());

        req.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
        );
        assert!(collect_parameters(&req, &OAuthParameters::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn body_is_left_in_place() {
        let req = request(Method::POST, "https://example.com/r", Some("b=2&c=3"), true);
        collect_parameters(&req, &OAuthParameters::new()).unwrap();
        let body = req.body().and_then(Body::as_bytes).unwrap();
        assert_eq!(body, b"b=2&c=3");
    }

    #[test]
    fn malformed_body_is_reported() {
        let req = request(Method::POST, "https://example.com/r", Some("b=%G1"), true);
        assert_eq!(
            collect_parameters(&req, &OAuthParameters::new()),
            Err(SignError::MalformedBody(FormError::InvalidEscape(
                "%G1".to_owned()
            )))
        );
    }

    #[test]
    fn malformed_query_is_reported() {
        let req = request(Method::GET, "https://example.com/r?a=%E5%B0", None, false);
        assert_eq!(
            collect_parameters(&req, &OAuthParameters::new()),
            Err(SignError::MalformedQuery(FormError::InvalidUtf8))
        );

        let req = request(Method::GET, "https://example.com/r?a=1;b=2", None, false);
        assert_eq!(
            collect_parameters(&req, &OAuthParameters::new()),
            Err(SignError::MalformedQuery(FormError::Semicolon(
                "a=1;b=2".to_owned()
            )))
        );
    }
}
