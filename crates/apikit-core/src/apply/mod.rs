//! Applying change plans

mod write;

pub use write::{apply_plan, ApplyError};
