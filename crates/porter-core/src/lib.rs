//! # porter-core
//!
//! Core types shared by every Porter crate.
//!
//! - Entity structs for the building domain (issues, emails, meetings, suppliers, ...)
//! - Status and priority enums with their server ⇄ label mapping tables
//! - Sequential ID generation (`ISS-2024-001`) that never reissues an ID
//! - `CacheState<T>` for load-once resources
//! - List scopes and issue filters
//! - Cross-cutting error types
//! - Draft and patch types for create/update operations
//! - The deterministic example-mode dataset

pub mod cache;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod query;
pub mod seed;
pub mod updates;
