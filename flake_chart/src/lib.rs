pub mod charts;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod page;
pub mod pipeline;
pub mod presenter;
pub mod query;
pub mod render;
pub mod reporting;
