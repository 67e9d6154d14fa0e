//! Request fingerprinting for the response cache.
//!
//! A fingerprint is a deterministic hash of the four fields that identify
//! a logical request: method, normalized endpoint path, query parameters,
//! and form body. Two requests built through different call paths collapse
//! to the same cache key as long as those fields are structurally equal.

use reqwest::Method;
use serde::Serialize;
use sha2::{Digest, Sha256};

use rebrick_common::Params;

/// Borrowed view of a logical request, ready for hashing.
#[derive(Debug, Serialize)]
pub(crate) struct Fingerprint<'a> {
    method: &'a str,
    path: &'a str,
    query: &'a Params,
    body: Option<&'a Params>,
}

impl<'a> Fingerprint<'a> {
    pub(crate) fn new(
        method: &'a Method,
        path: &'a str,
        query: &'a Params,
        body: Option<&'a Params>,
    ) -> Self {
        Self {
            method: method.as_str(),
            path,
            query,
            body,
        }
    }

    /// Render the cache key: SHA-256 over the serialized request, as hex.
    ///
    /// `Params` is a `BTreeMap`, so its keys serialize in sorted order and
    /// structurally equal requests hash identically no matter how their
    /// mappings were assembled. Collision resistance beyond SHA-256 is not
    /// required; the key never leaves the process.
    pub(crate) fn digest(&self) -> Result<String, serde_json::Error> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(self)?);
        Ok(hex::encode(hasher.finalize()))
    }
}
