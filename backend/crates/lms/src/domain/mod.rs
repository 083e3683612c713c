//! Domain layer

pub mod cart;
pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
