//! Signed REST client for the sportfeed endpoints.
//!
//! Every request carries `user`, `secret` and `timestamp` plus an MD5
//! `sign` over the sorted parameters. Responses are validated against the
//! API envelope (`code == 0` is the only success) and failures are mapped
//! onto [`ApiError`].

pub mod client;
pub mod error;
pub mod retry;
pub mod signer;

pub use client::{validate_envelope, ApiClient, ClientConfig};
pub use error::{ApiError, ApiResult};
pub use retry::RetryPolicy;
pub use signer::{
    build_signed_params, generate_signature, string_to_sign, Credentials, RequestParams,
    SIGN_PARAM,
};
