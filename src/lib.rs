pub mod config;
pub mod http;
pub mod models;
pub mod quiz;
pub mod seed;
pub mod store;
