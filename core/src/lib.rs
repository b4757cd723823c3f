//! Concurrent inventory collection.
//!
//! [`loader::Loader`] fans collectors out across services and regions and
//! funnels their rows to a single [`sink::RowSink`]. Providers are reached only
//! through the traits in [`provider`], so the same orchestration runs against
//! the AWS SDK adapters or an in-memory fake.

pub mod channel;
pub mod collectors;
pub mod dns_index;
pub mod error;
pub mod loader;
pub mod paginate;
pub mod provider;
pub mod service;
pub mod sink;
pub mod tasks;

pub use error::{CollectError, LoadError, ProviderError};
pub use loader::{LoadSummary, Loader};
pub use service::Service;
