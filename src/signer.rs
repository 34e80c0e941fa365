use std::collections::BTreeMap;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use http::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;

use crate::base_string::{signature_base, sorted_pairs};
use crate::params::collect_parameters;
use crate::sources::{Clock, NonceSource, RandomNonce, SystemClock};
use crate::{
    Config, HmacSha1, SignError, SignResult, SignatureMethod, Token, OAUTH_CALLBACK_KEY,
    OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY,
    OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY, OAUTH_VERSION_KEY,
};

const AUTHORIZATION_PREFIX: &str = "OAuth ";
const OAUTH_VERSION: &str = "1.0";

/// OAuth protocol parameters, keyed by parameter name.
pub type OAuthParameters = BTreeMap<String, String>;

/// Signs requests and sets their `Authorization` header.
///
/// A signer holds no mutable state; nonce and timestamp are drawn from its
/// sources once per signing call, so it can be shared between tasks.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSignatureMethod = HmacSha1, TClock = SystemClock, TNonce = RandomNonce> {
    config: &'a Config,
    signature_method: TSignatureMethod,
    clock: TClock,
    nonce_source: TNonce,
}

impl<'a> Signer<'a> {
    /// HMAC-SHA1 with the system clock and random nonces.
    pub fn new(config: &'a Config) -> Self {
        Signer::with_sources(config, HmacSha1, SystemClock, RandomNonce)
    }
}

impl<'a, TSignatureMethod, TClock, TNonce> Signer<'a, TSignatureMethod, TClock, TNonce>
where
    TSignatureMethod: SignatureMethod,
    TClock: Clock,
    TNonce: NonceSource,
{
    pub fn with_sources(
        config: &'a Config,
        signature_method: TSignatureMethod,
        clock: TClock,
        nonce_source: TNonce,
    ) -> Self {
        Signer {
            config,
            signature_method,
            clock,
            nonce_source,
        }
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Signs a temporary credential request (RFC 5849 2.1). Adds
    /// `oauth_callback`; the token secret is empty.
    pub fn sign_request_token(&self, request: &mut Request) -> SignResult<()> {
        let mut oauth_params = self.common_params();
        oauth_params.insert(
            OAUTH_CALLBACK_KEY.to_owned(),
            self.config.callback_url().to_owned(),
        );
        self.set_authorization_header(request, oauth_params, "")
    }

    /// Signs a token credential request (RFC 5849 2.3) with the temporary
    /// credential and the verifier the resource owner received.
    pub fn sign_access_token(
        &self,
        request: &mut Request,
        request_token: &Token,
        verifier: &str,
    ) -> SignResult<()> {
        let mut oauth_params = self.common_params();
        oauth_params.insert(OAUTH_TOKEN_KEY.to_owned(), request_token.token.clone());
        oauth_params.insert(OAUTH_VERIFIER_KEY.to_owned(), verifier.to_owned());
        self.set_authorization_header(request, oauth_params, &request_token.token_secret)
    }

    /// Signs a resource request with a token credential (RFC 5849 3.1).
    pub fn sign_request(&self, request: &mut Request, access_token: &Token) -> SignResult<()> {
        let mut oauth_params = self.common_params();
        oauth_params.insert(OAUTH_TOKEN_KEY.to_owned(), access_token.token.clone());
        self.set_authorization_header(request, oauth_params, &access_token.token_secret)
    }

    /// Fresh protocol parameters shared by every request, without
    /// `oauth_signature`.
    pub fn common_params(&self) -> OAuthParameters {
        let mut params = OAuthParameters::new();
        params.insert(
            OAUTH_CONSUMER_KEY.to_owned(),
            self.config.consumer_key().to_owned(),
        );
        params.insert(
            OAUTH_SIGNATURE_METHOD_KEY.to_owned(),
            self.signature_method.name().to_owned(),
        );
        params.insert(
            OAUTH_TIMESTAMP_KEY.to_owned(),
            self.clock.now().to_string(),
        );
        params.insert(OAUTH_NONCE_KEY.to_owned(), self.nonce_source.nonce());
        params.insert(OAUTH_VERSION_KEY.to_owned(), OAUTH_VERSION.to_owned());
        params
    }

    /// Base64 encoded signature of `base_string`.
    pub fn sign(&self, token_secret: &str, base_string: &str) -> String {
        let signature =
            self.signature_method
                .sign(self.config.consumer_secret(), token_secret, base_string);
        BASE64_STANDARD.encode(signature)
    }

    fn set_authorization_header(
        &self,
        request: &mut Request,
        mut oauth_params: OAuthParameters,
        token_secret: &str,
    ) -> SignResult<()> {
        let params = collect_parameters(request, &oauth_params)?;
        let base_string = signature_base(request.method(), request.url(), &params);
        let signature = self.sign(token_secret, &base_string);
        oauth_params.insert(OAUTH_SIGNATURE_KEY.to_owned(), signature);

        let header = HeaderValue::from_str(&authorization_header(&oauth_params))
            .map_err(|err| SignError::InvalidHeader(err.to_string()))?;
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "signed OAuth1 request"
        );
        request.headers_mut().insert(AUTHORIZATION, header);
        Ok(())
    }
}

/// Formats protocol parameters as an `Authorization` header value (RFC 5849
/// 3.5.1): `OAuth ` followed by `key="value"` pairs, percent encoded, ordered
/// by encoded key and separated by `, `.
///
/// `oauth_params` should already contain `oauth_signature`.
pub fn authorization_header(oauth_params: &OAuthParameters) -> String {
    let pairs = sorted_pairs(oauth_params, |key, value| format!("{}=\"{}\"", key, value));
    format!("{}{}", AUTHORIZATION_PREFIX, pairs.join(", "))
}
