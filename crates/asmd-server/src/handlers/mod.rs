//! HTTP request handlers.

pub(crate) mod content;
