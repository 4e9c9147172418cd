//! Data shapes for the upload authorization workflow.
//!
//! Both entities are created fresh per request. `UploadRecord` is the only
//! one that outlives the invocation, in the record store.

pub mod upload;
