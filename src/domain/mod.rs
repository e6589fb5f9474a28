//! Content records and the documents that hold them.

pub mod ads;
pub mod content;
pub mod documents;
pub mod error;
pub mod games;
pub mod seo;
