//! # Kollny Core
//!
//! Shared, I/O-free logic for Kollny Express: the static recipe catalog,
//! pantry normalization and request validation, the matching/ranking
//! algorithm, and the persistence collaborator trait.
//!
//! This crate contains no tokio, sqlx, or HTTP dependencies.

pub mod catalog;
pub mod error;
pub mod models;
pub mod pantry;
pub mod search;
pub mod store;
