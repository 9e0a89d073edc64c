//! Library half of the CRM import CLI: logging setup and the pipeline the
//! commands drive.

pub mod logging;
pub mod pipeline;
