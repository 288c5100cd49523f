//! Request signing.
//!
//! The signature is the lowercase hex MD5 of `key=value` pairs joined by
//! `&`, iterated in ascending key order, over every parameter except `sign`
//! itself. The secret is part of the signed set.

use md5::{Digest, Md5};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the computed signature parameter.
pub const SIGN_PARAM: &str = "sign";

/// Query parameters, ordered by key.
pub type RequestParams = BTreeMap<String, String>;

/// API credentials.
///
/// The secret is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    secret: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            secret: secret.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Canonical string the signature is computed over.
pub fn string_to_sign(params: &RequestParams) -> String {
    params
        .iter()
        .filter(|(key, _)| key.as_str() != SIGN_PARAM)
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// MD5 signature of `params` (excluding any existing `sign`).
pub fn generate_signature(params: &RequestParams) -> String {
    let digest = Md5::digest(string_to_sign(params).as_bytes());
    hex::encode(digest)
}

/// Build the full, signed parameter set for one request.
///
/// Base parameters are inserted first and `extra` is merged on top, so a
/// colliding caller key wins. `sign` is always recomputed last.
pub fn build_signed_params(
    credentials: &Credentials,
    timestamp: i64,
    extra: &RequestParams,
) -> RequestParams {
    let mut params = RequestParams::new();
    params.insert("user".to_string(), credentials.user.clone());
    params.insert("secret".to_string(), credentials.secret.clone());
    params.insert("timestamp".to_string(), timestamp.to_string());

    for (key, value) in extra {
        params.insert(key.clone(), value.clone());
    }

    let sign = generate_signature(&params);
    params.insert(SIGN_PARAM.to_string(), sign);
    params
}
