//! Presentation Layer
//!
//! HTTP handlers, DTOs and router for categories and products.

pub mod dto;
pub mod handlers;
pub mod router;
