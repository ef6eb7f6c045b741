//! Platform-agnostic building blocks shared by every view.

pub mod config;
pub mod format;
pub mod platform;
pub mod session;
pub mod storage;
pub mod timing;
