pub mod cli;
pub mod cloudflare;
pub mod common;
pub mod config;
pub mod service;
pub mod zonefile;

pub use config::*;
