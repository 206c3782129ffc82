pub mod error;
mod format;
pub mod service;
