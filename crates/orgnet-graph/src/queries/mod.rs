//! Read-only catalog queries.

pub mod directory;
pub mod export;
pub mod lookup;
pub mod nodes;
pub mod overview;
