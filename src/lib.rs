// src/lib.rs

// HTTP server, middleware and non-auth handlers
pub mod api;

// Authentication module
pub mod auth;

// Environment configuration
pub mod config;

pub mod utils;
