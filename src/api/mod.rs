//! MediaFire metadata API client and types.

pub mod client;

pub use client::{ApiClient, ContentType};
