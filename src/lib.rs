pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod models;
pub mod notify;
pub mod processor;
pub mod store;
