//! High-level convenience API.
//!
//! - [`Explorer`] — owns a [`PointRegistry`](crate::kernel::PointRegistry)
//!   and an [`ExplorerConfig`](crate::config::ExplorerConfig), delegating to
//!   the [`kernel`](crate::kernel) and [`discovery`](crate::discovery) layers.
//! - [`SharedRegistry`] — a lock-guarded registry for hosts that serve
//!   concurrent requests against one point set.
//!
//! For production or library code, prefer importing from [`kernel`](crate::kernel)
//! and [`discovery`](crate::discovery) directly.

pub mod client;
pub mod shared;

pub use client::Explorer;
pub use shared::SharedRegistry;
