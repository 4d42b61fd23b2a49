//! Library side of the lead import CLI: logging setup and the file pipeline.

pub mod logging;
pub mod pipeline;
