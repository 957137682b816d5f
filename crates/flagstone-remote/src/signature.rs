//! Response signature verification.

use flagstone_core::FlagError;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Decides whether a remote response was produced by the trusted evaluator.
///
/// Implementations must treat a missing signature as invalid.
pub trait SignatureVerifier: Send + Sync {
    fn is_valid(&self, headers: &HeaderMap, body: &[u8]) -> bool;
}

/// Verifies a hex-encoded HMAC-SHA256 of the response body carried in a
/// response header.
///
/// # Example
///
/// ```
/// use flagstone_remote::{HmacSignatureVerifier, SignatureVerifier};
/// use reqwest::header::{HeaderMap, HeaderValue};
///
/// let verifier = HmacSignatureVerifier::new("x-cs-signature", "s3cret").unwrap();
/// let body = br#"{"data":{}}"#;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-cs-signature", HeaderValue::from_str(&verifier.sign(body)).unwrap());
/// assert!(verifier.is_valid(&headers, body));
/// ```
#[derive(Clone)]
pub struct HmacSignatureVerifier {
    header: HeaderName,
    mac: HmacSha256,
}

impl HmacSignatureVerifier {
    pub fn new(header: &str, secret: impl AsRef<[u8]>) -> Result<Self, FlagError> {
        let header = HeaderName::from_bytes(header.as_bytes()).map_err(|e| {
            FlagError::configuration(format!("invalid signature header '{}': {}", header, e))
        })?;
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .map_err(|e| FlagError::configuration(format!("invalid signing secret: {}", e)))?;
        Ok(Self { header, mac })
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Hex-encoded signature for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl SignatureVerifier for HmacSignatureVerifier {
    fn is_valid(&self, headers: &HeaderMap, body: &[u8]) -> bool {
        let Some(signature) = headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| hex::decode(value.trim()).ok())
        else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(body);
        mac.verify_slice(&signature).is_ok()
    }
}

impl std::fmt::Debug for HmacSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSignatureVerifier")
            .field("header", &self.header)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
