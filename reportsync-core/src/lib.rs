mod client;
mod kind;

pub use client::{CatalogClient, CatalogEntry, CatalogError, Credentials, FolderCreation};
pub use kind::ResourceKind;
