//! AWS Signature Version 4 request signing
//!
//! Minimal signer for the JSON-target calls this gateway makes: single
//! POST to `/` with no query string. Follows the canonical-request /
//! string-to-sign / derived-key scheme from the SigV4 specification.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Access key pair for the remote service.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

/// Headers produced by signing, to be attached to the outgoing request.
#[derive(Debug)]
pub struct Signature {
    pub amz_date: String,
    pub authorization: String,
}

/// SigV4 signer scoped to one region and service.
pub struct RequestSigner {
    credentials: Credentials,
    region: String,
    service: String,
}

impl RequestSigner {
    pub fn new(credentials: Credentials, region: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: service.into(),
        }
    }

    /// Sign a request.
    ///
    /// `extra_headers` lists the headers beyond `host` and `x-amz-date`
    /// that take part in signing; they must be sent on the request
    /// exactly as given here.
    pub fn sign(
        &self,
        method: &str,
        host: &str,
        path: &str,
        query: &str,
        extra_headers: &[(&str, &str)],
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Signature {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        // Canonical headers: lowercase names, trimmed values, sorted.
        let mut headers: Vec<(String, String)> = extra_headers
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.trim().to_string()))
            .collect();
        headers.push(("host".to_string(), host.trim().to_string()));
        headers.push(("x-amz-date".to_string(), amz_date.clone()));
        headers.sort();

        let signed_names = headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let canonical_headers: String = headers
            .iter()
            .map(|(k, v)| format!("{}:{}\n", k, v))
            .collect();
        let payload_hash = hex::encode(Sha256::digest(body));

        let canonical_request = format!(
            "{method}\n{path}\n{query}\n{canonical_headers}\n{signed_names}\n{payload_hash}"
        );

        let scope = format!("{}/{}/{}/aws4_request", date, self.region, self.service);
        let string_to_sign = format!(
            "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let key = self.signing_key(&date);
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()));

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_names}, Signature={signature}",
            self.credentials.access_key_id
        );

        Signature {
            amz_date,
            authorization,
        }
    }

    /// Derive the per-date signing key from the secret.
    fn signing_key(&self, date: &str) -> Vec<u8> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key);
        let k_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, self.service.as_bytes());
        hmac_sha256(&k_service, b"aws4_request")
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC-SHA256 accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
