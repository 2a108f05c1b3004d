pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod reporting;
pub mod stats;
pub mod support;
pub mod timeline;
pub mod tree;
pub mod types;
pub mod walker;
