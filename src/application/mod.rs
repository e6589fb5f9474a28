//! Application services between the HTTP surface and the document store.

pub mod ads;
pub mod catalog;
pub mod content;
pub(crate) mod decode;
pub mod error;
pub mod health;
pub mod page;
pub mod persistence;
pub mod seo;
pub mod structured_data;
