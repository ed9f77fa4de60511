//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Sweeper: refreshes near-expiry records and evicts expired ones at the
//!   configured interval

mod sweeper;

pub use sweeper::spawn_sweep_task;
