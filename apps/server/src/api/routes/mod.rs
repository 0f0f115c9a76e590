//! Route tables

pub mod metrics;
pub mod records;
pub mod search;
