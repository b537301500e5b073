//! Reversible edit history for a vector map editor.
//!
//! The [`history`] module holds the core: edit records that capture exactly
//! what one mutation changed, and the log that undoes and redoes them in
//! order. The [`document`] module defines the capability traits records call
//! into, plus an in-memory reference document. [`presentation`] turns the
//! log into Edit-menu state.

pub mod config;
pub mod constants;
pub mod document;
pub mod history;
pub mod logging;
pub mod paths;
pub mod presentation;
