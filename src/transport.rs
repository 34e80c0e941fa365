use async_trait::async_trait;
use reqwest::Request;

use crate::Result;

/// Sends a prepared request and hands back the buffered response.
///
/// Implementations own connection reuse, TLS, timeouts and cancellation. They
/// must not retry: a retried OAuth1 request needs a new nonce and timestamp,
/// so retrying is left to the caller.
#[async_trait]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<http::Response<String>>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: Request) -> Result<http::Response<String>> {
        let response = self.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        let mut buffered = http::Response::new(text);
        *buffered.status_mut() = status;
        *buffered.headers_mut() = headers;
        Ok(buffered)
    }
}

#[async_trait]
impl<T> Transport for &T
where
    T: Transport + Sync + ?Sized,
{
    async fn send(&self, request: Request) -> Result<http::Response<String>> {
        (**self).send(request).await
    }
}
