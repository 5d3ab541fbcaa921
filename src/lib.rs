//! Chirp Backend Library
//!
//! This library exports the core modules for the chirp microblogging
//! backend server.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
