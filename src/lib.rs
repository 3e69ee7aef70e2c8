//! CRUD HTTP service for job openings, backed by SQLite.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod shutdown;
