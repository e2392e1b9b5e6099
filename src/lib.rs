pub mod api;
pub mod config;
pub mod models;
pub mod server;
pub mod service;
pub mod store;
