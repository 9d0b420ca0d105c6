//! Core types for the Skein container layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every container in the workspace: opaque
//! element references, per-instance list identity, the disposer
//! capability, error types, and configuration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod element;
pub mod error;

pub use config::ListConfig;
pub use element::{Disposer, ElementRef, ListId};
pub use error::{BufferError, ListError};
