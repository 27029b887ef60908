//! Client library for mirroring past broadcasts.
//!
//! Wraps the two unauthenticated JSON endpoints involved in a mirror run:
//! the channel video listing and the per-video archive metadata, plus the
//! deterministic part filename scheme used for the on-disk mirror.

pub mod client;
pub mod error;
pub mod models;
pub mod naming;

pub use client::{ApiResponse, ArchiveClient, default_client};
pub use error::ArchiveError;
pub use models::{Part, Video};
