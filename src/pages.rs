//! Server-rendered pages, components and callbacks
//!
//! This module provides access to `tpr-pages`. See [`Dashboard`] for the
//! entry point.

pub use tpr_pages::*;
