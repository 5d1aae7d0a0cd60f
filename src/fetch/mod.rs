//! Quiz retrieval: a single-attempt [`QuizSource`], the retrying and caching
//! [`Fetcher`], and the background worker that lets a newer request supersede
//! an older one.

mod error;
mod fetcher;
mod policy;
mod source;
mod worker;

pub use error::FetchError;
pub use fetcher::Fetcher;
pub use policy::{CancelToken, RetryPolicy};
pub use source::{
    DEFAULT_PROXY_URL, DEFAULT_TARGET_URL, HttpSource, NetworkConfig, QuizSource, decode_envelope,
};
pub use worker::{FetchCommand, FetchHandle, FetchResult, spawn};

#[cfg(test)]
pub(crate) use fetcher::tests as testing;
