//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{Category, Product, ProductDraft};
pub use repository::{CategoryRepository, ProductRepository};
