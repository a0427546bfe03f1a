//! geomx-dns Infrastructure Layer
pub mod cache;
pub mod dns;
pub mod geo;
pub mod zone;
