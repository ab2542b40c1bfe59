//! Flutter-facing bindings for the tardy log core.

pub mod api;
