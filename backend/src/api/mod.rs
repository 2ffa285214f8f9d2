//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the account resource
//! endpoints, excluding registration and session routes which are handled
//! separately.

pub mod account;
pub mod common;
