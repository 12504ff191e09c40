pub mod auth;
pub mod calc;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod latency;
pub mod logging;
pub mod pages;
pub mod router;
