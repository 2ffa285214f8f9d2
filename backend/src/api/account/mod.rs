//! Module for account management API endpoints.
//!
//! This module handles functionalities related to account records, such as
//! creating, listing, retrieving, replacing, and deleting them.

pub mod handlers;
pub mod models;
pub mod routes;
