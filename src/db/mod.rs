pub mod connection;
pub mod migrations;
pub mod models;
pub mod opening_repository;
