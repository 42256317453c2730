//! CLI command implementations.

pub(crate) mod toc;

pub(crate) use toc::TocCommand;
