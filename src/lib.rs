//! Backend for the social engagement dashboard.
//!
//! An uploaded CSV of social-media activity flows through a fixed pipeline:
//! - `schema` normalizes headers and locates the required columns
//! - `sanitize` repairs or drops malformed rows into a clean table
//! - `filter` narrows the clean table by the current selection
//! - `aggregate` computes the five chart summaries
//! - `insights` turns each summary into display sentences
//!
//! `pipeline` ties these together as a pure function, `session` keeps
//! uploads in memory, and `routes` exposes everything over HTTP.
//!
//! This crate follows the Explicit Module Boundary Pattern (EMBP): routes
//! only reach siblings through the re-exports below.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod insights;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod sanitize;
pub mod schema;
pub mod session;

pub use config::Config;
pub use error::DashboardError;

// These are not used here but they are imported to be used by routes/*.rs, that way
// refactoring is easier since routes/*.rs do not have knowledge of the individual
// pipeline modules, only of the crate root.
pub use filter::{DateRange, FilterConfig, FilterDomain, Selector};
pub use models::{IngestStats, RawRecord, Record};
pub use pipeline::DashboardOutcome;
pub use session::SessionStore;
