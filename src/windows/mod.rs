//! Windows platform layer: raw API bindings and handle types

pub mod bindings;
pub mod types;
