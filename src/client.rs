// ----------------------------------------------------------------------------
// The request builder methods below mirror seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use reqwest::{Client as ReqwestClient, IntoUrl, Method, Request, RequestBuilder, Response};

use crate::sources::{Clock, NonceSource, RandomNonce, SystemClock};
use crate::{Config, HmacSha1, Result, SignatureMethod, Signer, Token};

/// Turns a `reqwest::Client` into one that signs every request with an
/// access token.
pub trait OAuthClientProvider {
    fn oauth1(self, config: &Config, access_token: Token) -> Client<'_>
    where
        Self: Sized,
    {
        self.oauth1_with_signer(Signer::new(config), access_token)
    }

    fn oauth1_with_signer<'a, TSignatureMethod, TClock, TNonce>(
        self,
        signer: Signer<'a, TSignatureMethod, TClock, TNonce>,
        access_token: Token,
    ) -> Client<'a, TSignatureMethod, TClock, TNonce>
    where
        Self: Sized,
        TSignatureMethod: SignatureMethod,
        TClock: Clock,
        TNonce: NonceSource;
}

impl OAuthClientProvider for ReqwestClient {
    fn oauth1_with_signer<'a, TSignatureMethod, TClock, TNonce>(
        self,
        signer: Signer<'a, TSignatureMethod, TClock, TNonce>,
        access_token: Token,
    ) -> Client<'a, TSignatureMethod, TClock, TNonce>
    where
        TSignatureMethod: SignatureMethod,
        TClock: Clock,
        TNonce: NonceSource,
    {
        Client {
            inner: self,
            signer,
            access_token,
        }
    }
}

/// A `reqwest::Client` paired with a signer and an access token.
///
/// Every request gets a fresh nonce and timestamp when it is prepared, so a
/// retried request must go through [`Client::prepare`] again.
#[derive(Debug)]
pub struct Client<'a, TSignatureMethod = HmacSha1, TClock = SystemClock, TNonce = RandomNonce> {
    inner: ReqwestClient,
    signer: Signer<'a, TSignatureMethod, TClock, TNonce>,
    access_token: Token,
}

impl<'a, TSignatureMethod, TClock, TNonce> Client<'a, TSignatureMethod, TClock, TNonce>
where
    TSignatureMethod: SignatureMethod,
    TClock: Clock,
    TNonce: NonceSource,
{
    /// Starts a `GET` request to `url`.
    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Starts a `POST` request to `url`.
    pub fn post<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Starts a `PUT` request to `url`.
    pub fn put<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    /// Starts a `PATCH` request to `url`.
    pub fn patch<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    /// Starts a `DELETE` request to `url`.
    pub fn delete<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Starts a `HEAD` request to `url`.
    pub fn head<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::HEAD, url)
    }

    /// Starts a request with an arbitrary method.
    ///
    /// The builder is reqwest's own; hand it back to [`Client::send`] so the
    /// request gets signed.
    pub fn request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        self.inner.request(method, url)
    }

    /// Builds the request and sets its `Authorization` header.
    ///
    /// # Errors
    ///
    /// Fails if the builder holds an error or the request cannot be signed,
    /// e.g. a malformed form body.
    pub fn prepare(&self, builder: RequestBuilder) -> Result<Request> {
        let mut request = builder.build()?;
        self.signer.sign_request(&mut request, &self.access_token)?;
        Ok(request)
    }

    /// Signs the request and sends it.
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        self.signer.sign_request(&mut request, &self.access_token)?;
        Ok(self.inner.execute(request).await?)
    }

    /// Builds, signs and sends the request.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = self.prepare(builder)?;
        Ok(self.inner.execute(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use http::header::{AUTHORIZATION, CONTENT_TYPE};

    use super::*;
    use crate::sources::{FixedClock, FixedNonce};
    use crate::{Error, SignError, FORM_CONTENT_TYPE};

    fn twitter_config() -> Config {
        Config::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        )
    }

    fn twitter_token() -> Token {
        Token::new(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
    }

    #[test]
    fn prepare_signs_form_post() {
        let config = twitter_config();
        let signer = Signer::with_sources(
            &config,
            HmacSha1,
            FixedClock(1_318_622_958),
            FixedNonce::new("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
        );
        let client = ReqwestClient::new().oauth1_with_signer(signer, twitter_token());

        let request = client
            .prepare(
                client
                    .post("https://api.twitter.com/1.1/statuses/update.json")
                    .form(&[
                        ("include_entities", "true"),
                        (
                            "status",
                            "Hello Ladies + Gentlemen, a signed OAuth request!",
                        ),
                    ]),
            )
            .unwrap();

        assert_eq!(request.headers()[CONTENT_TYPE], FORM_CONTENT_TYPE);
        let header = request.headers()[AUTHORIZATION].to_str().unwrap();
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains(
            "oauth_token=\"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\""
        ));
    }

    #[test]
    fn prepare_uses_fresh_nonce() {
        let config = twitter_config();
        let client = ReqwestClient::new().oauth1(&config, twitter_token());
        let first = client
            .prepare(client.get("https://api.twitter.com/1.1/statuses/home_timeline.json"))
            .unwrap();
        let second = client
            .prepare(client.get("https://api.twitter.com/1.1/statuses/home_timeline.json"))
            .unwrap();
        assert_ne!(
            first.headers()[AUTHORIZATION],
            second.headers()[AUTHORIZATION]
        );
    }

    #[test]
    fn builder_methods_keep_method_and_url() {
        let config = twitter_config();
        let client = ReqwestClient::new().oauth1(&config, twitter_token());
        let url = "https://api.twitter.com/1.1/lists/members.json";
        for (builder, method) in vec![
            (client.get(url), Method::GET),
            (client.post(url), Method::POST),
            (client.put(url), Method::PUT),
            (client.patch(url), Method::PATCH),
            (client.delete(url), Method::DELETE),
            (client.head(url), Method::HEAD),
            (client.request(Method::OPTIONS, url), Method::OPTIONS),
        ] {
            let request = client.prepare(builder).unwrap();
            assert_eq!(request.method(), &method);
            assert_eq!(request.url().as_str(), url);
            assert!(request.headers()[AUTHORIZATION]
                .to_str()
                .unwrap()
                .starts_with("OAuth "));
        }
    }

    #[test]
    fn prepare_reports_malformed_body() {
        let config = twitter_config();
        let client = ReqwestClient::new().oauth1(&config, twitter_token());
        let builder = client
            .post("https://api.twitter.com/1.1/statuses/update.json")
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body("status=%");
        assert!(matches!(
            client.prepare(builder),
            Err(Error::Signer(SignError::MalformedBody(_)))
        ));
    }
}
