//! Acting principal resolution

pub(crate) mod middleware;
