//! CLI command implementations.

pub(crate) mod beta;
pub(crate) mod load;
pub(crate) mod returns;
pub(crate) mod universe;
