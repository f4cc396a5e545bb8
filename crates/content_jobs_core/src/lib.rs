//! Content job domain primitives.
//!
//! This crate owns request/response contracts, prompt text, storage key
//! conventions and callback HTML. It intentionally excludes AWS SDK, HTTP and
//! Lambda runtime concerns.

pub mod contract;
pub mod html;
pub mod prompts;
pub mod storage_keys;
pub mod text;
