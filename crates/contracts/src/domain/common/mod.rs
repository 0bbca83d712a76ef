//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod wire_datetime;

// Re-exports
pub use aggregate_id::AggregateId;
