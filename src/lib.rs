//! # Kollny Express
//!
//! A small HTTP service that matches a pantry (a list of ingredient names)
//! against a fixed recipe catalog, filters by difficulty and healthiness,
//! and returns ranked matches. Each search is logged, best-effort, to an
//! optional SQLite database.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌─────────────────────┐   ┌──────────────┐
//! │    HTTP    │──▶│  kollny-core        │   │   SQLite     │
//! │  (axum)    │   │  parse → match →    │   │  documents   │
//! └─────┬──────┘   │  rank → filter      │   └──────▲───────┘
//!       │          └─────────────────────┘          │
//!       └──── SearchLogger (spawned, errors dropped) ┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! kollny init                         # create database (if [db] configured)
//! kollny recipes eggs onion tomato    # match from the terminal
//! kollny serve                        # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and environment overrides |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite persistence collaborator |
//! | [`search_log`] | Best-effort search logging |
//! | [`diagnostics`] | Persistence diagnostics report |
//! | [`recipes`] | CLI matcher frontends |
//! | [`server`] | HTTP server |

pub mod config;
pub mod db;
pub mod diagnostics;
pub mod migrate;
pub mod recipes;
pub mod search_log;
pub mod server;
pub mod sqlite_store;
