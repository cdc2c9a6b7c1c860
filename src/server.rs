//! HTTP server, layered settings, logging and shutdown
//!
//! This module provides access to `tpr-server`.

pub use tpr_server::*;
