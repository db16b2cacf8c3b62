//! eMNC indicators engine: yearly records, derived metrics and correlation
//! analysis for emerging-market multinational dashboards.
//!
//! Data flow:
//!   RecordStore → enrich (derived metrics) → correlation → QueryFacade
//!
//! Everything is computed on demand from an immutable store. Nothing is
//! persisted, and there is no global dataset.

pub mod config;
pub mod correlation;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod facade;
pub mod loader;
pub mod metric;
pub mod narrative;
pub mod record;
pub mod store;
pub mod summary;
pub mod types;
