//! Infrastructure layer

pub mod postgres;
