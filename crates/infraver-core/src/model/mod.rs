//! Resource model.
//!
//! A [`ResourceTable`] maps a [`ResourceIdentity`] (type + name) to the flat
//! [`FieldMap`] written inside its block. Tables are rebuilt from file
//! contents on every run and never persisted.

pub mod identity;
pub mod table;

pub use identity::ResourceIdentity;
pub use table::{FieldMap, ResourceTable};
