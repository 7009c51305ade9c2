//! ImagiNarrate Server Library
//!
//! This module exposes the server components for testing purposes.

pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
