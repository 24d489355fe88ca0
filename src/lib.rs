pub mod advisor;
pub mod config;
pub mod credentials;
pub mod dataset;
pub mod engine;
pub mod output;
pub mod pipeline;
pub mod po;
pub mod tui;
