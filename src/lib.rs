pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod session;
#[cfg(test)]
pub mod test_helpers;
