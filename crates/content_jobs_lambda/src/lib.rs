//! Lambda adapters, handlers and binaries for the content jobs.
//!
//! Handlers are synchronous and talk to the outside world only through the
//! adapter traits; `lambda` wires the AWS and HTTP implementations in.

pub mod adapters;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod handlers;
pub mod lambda;
pub mod logging;
pub mod render;
