pub mod asset;
pub mod cache;
pub mod checksum;
pub mod config;
pub mod family;
pub mod fetch;
pub mod loader;
pub mod logging;
pub mod resolver;
