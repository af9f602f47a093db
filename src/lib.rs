//! PasteCycle host: configuration, logging, dependency wiring and the
//! process entry points.

pub mod bootstrap;
pub mod cli;
