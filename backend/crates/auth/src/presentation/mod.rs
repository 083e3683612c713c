//! Presentation layer

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
