//! Host-runtime surface shared by all resource types.
//!
//! - [`ResourceData`] - identifier slot plus attribute map for one instance
//! - [`ResourceHandler`] - create/read/update/delete/import lifecycle
//! - [`NumericId`], [`ImportId`] - parsed identifiers

pub mod data;
pub mod handler;
pub mod id;

pub use data::ResourceData;
pub use handler::ResourceHandler;
pub use id::{IMPORT_ID_FORMAT, ImportId, NumericId};
