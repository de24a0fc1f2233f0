//! Chariot Registry API Library
//!
//! Read-only HTTP service over a small registry of citizens, chariot
//! licences, fines and relationships. Exposes JSON lookups, HTML table views
//! and a request echo endpoint.
//!
//! # Modules
//!
//! - `api`: HTTP-layer namespace.
//! - `core`: Domain namespace.
//! - `data`: Store and rendering namespace.
//! - `config`: Configuration management.
//! - `db`: Database connection, pool and schema bootstrap.
//! - `db_storage`: Row accessor (`fetch_one` / `fetch_all`).
//! - `echo_handler`: Request introspection endpoint.
//! - `errors`: Error handling types.
//! - `fines`: Unpaid fines aggregation.
//! - `handlers`: Application state, JSON lookups and landing output.
//! - `models`: Records and API shapes.
//! - `routes`: Router and middleware.
//! - `view_handler`: HTML table view handlers.
//! - `views`: Table renderer.

pub mod api;
pub mod core;
pub mod data;

pub mod config;
pub mod db;
pub mod db_storage;
pub mod echo_handler;
pub mod errors;
pub mod fines;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod view_handler;
pub mod views;
