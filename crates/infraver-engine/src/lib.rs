//! infraver engine - orchestration layer
//!
//! Coordinates the pure classification kernel (`infraver-core`) with
//! repository access (`infraver-repo`). Each run resolves the reference tag
//! once and builds each resource table once.

pub mod commands;
