//! `PostgreSQL` backend over a `deadpool-postgres` pool.

mod config;
pub(crate) mod executor;
mod params;
mod query;
