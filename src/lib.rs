// pip-search: PyPI package search client

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod index;
pub mod metadata;
pub mod search;
