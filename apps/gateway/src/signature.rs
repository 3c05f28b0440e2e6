use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha1 = Hmac<Sha1>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("x-hub-signature header missing")]
    Missing,
    #[error("malformed x-hub-signature header")]
    Malformed,
    #[error("request signature does not match the payload")]
    Mismatch,
}

/// Checks an `x-hub-signature` header of the form `sha1=<hex>` against an
/// HMAC-SHA1 digest of the raw request body. Digests are compared in
/// constant time.
pub fn verify(app_secret: &str, header: Option<&str>, body: &[u8]) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::Missing)?;
    let (method, provided) = header.split_once('=').ok_or(SignatureError::Malformed)?;
    if method != "sha1" {
        return Err(SignatureError::Malformed);
    }

    let mut mac =
        HmacSha1::new_from_slice(app_secret.as_bytes()).map_err(|_| SignatureError::Malformed)?;
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    if bool::from(expected.as_bytes().ct_eq(provided.as_bytes())) {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Signs a body the way the platform does.
#[cfg(test)]
pub fn sign(app_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(app_secret.as_bytes()).expect("hmac accepts any key");
    mac.update(body);
    format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
}
