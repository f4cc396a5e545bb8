pub mod aws;
pub mod callback;
pub mod completion;
pub mod http;
pub mod object_store;
pub mod web;

use std::future::Future;

/// Drives an async SDK call to completion from synchronous adapter code.
///
/// Requires the multi-threaded tokio runtime the Lambda binaries start.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
