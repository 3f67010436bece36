pub mod add;
pub mod browse;
pub mod clear;
pub mod config;
pub mod context;
pub mod library;
pub mod prompts;
pub mod spinner;
