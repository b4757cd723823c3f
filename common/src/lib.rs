//! Shared models and static tables used by every awsinventory crate.
//!
//! * [`inventory`]: the canonical [`inventory::Row`] and its CSV encoding.
//! * [`regions`]: the known-region table and partition lookup.
//! * [`config`]: runtime knobs for a collection run.

pub mod config;
pub mod inventory;
pub mod regions;
