//! Database repositories providing persistence operations per entity.

pub mod account_repository;
pub mod user_repository;
