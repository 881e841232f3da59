//! Small generic helpers.

pub mod rate_limit;
