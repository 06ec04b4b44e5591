//! RentMyFit API library.
//!
//! Accounts, cart and wishlist, catalog and rental orders behind a JSON
//! HTTP interface. The binary in `main.rs` wires this up with Sentry and a
//! listener; everything else lives here so it can be tested in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
