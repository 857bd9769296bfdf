// src/lib.rs
// productive-mcp - Productive.io project management over MCP

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod config;
pub mod error;
pub mod inbox;
pub mod mcp;
pub mod normalize;

pub use error::{ProductiveError, Result};
