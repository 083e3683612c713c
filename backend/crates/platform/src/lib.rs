//! Platform - Cross-cutting infrastructure
//!
//! Shared building blocks with no domain knowledge:
//! - `client` - client IP / fingerprint extraction, bot heuristic
//! - `cookie` - cookie configuration and parsing
//! - `crypto` - hashing, HMAC-signed tokens, random bytes
//! - `mailer` - best-effort outbound email over an HTTP API
//! - `password` - Argon2id password hashing
//! - `rate_limit` - fixed-window rate limit vocabulary

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod mailer;
pub mod password;
pub mod rate_limit;
