//! `SQLite` backend over a `deadpool-sqlite` pool.
//!
//! rusqlite is synchronous; every call hops onto the pooled connection's
//! blocking context via `interact`.

mod config;
pub(crate) mod executor;
mod params;
mod query;
