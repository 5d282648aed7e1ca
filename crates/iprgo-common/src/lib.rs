//! IPRGO Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities for the IPRGO workspace members.
//!
//! - **Logging**: one place to configure `tracing` output for every binary
//!
//! # Example
//!
//! ```no_run
//! use iprgo_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod logging;
