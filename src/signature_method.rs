use hmac::{Hmac, Mac};
use sha1::Sha1;

/// Computes raw signature bytes over a signature base string.
///
/// The signer owns base string construction and header assembly; a method
/// only turns secrets and the base string into bytes, which are then base64
/// encoded into `oauth_signature`.
pub trait SignatureMethod {
    /// Value of `oauth_signature_method`.
    fn name(&self) -> &'static str;

    fn sign(&self, consumer_secret: &str, token_secret: &str, base_string: &str) -> Vec<u8>;
}

/// `HMAC-SHA1` (RFC 5849 3.4.2).
///
/// The key is `consumer_secret&token_secret`, with the secrets used as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HmacSha1;

impl SignatureMethod for HmacSha1 {
    fn name(&self) -> &'static str {
        "HMAC-SHA1"
    }

    fn sign(&self, consumer_secret: &str, token_secret: &str, base_string: &str) -> Vec<u8> {
        let signing_key = [consumer_secret, token_secret].join("&");
        let mut mac = Hmac::<Sha1>::new_from_slice(signing_key.as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(base_string.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

impl<T> SignatureMethod for &T
where
    T: SignatureMethod + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn sign(&self, consumer_secret: &str, token_secret: &str, base_string: &str) -> Vec<u8> {
        (**self).sign(consumer_secret, token_secret, base_string)
    }
}
