//! Request middleware.
//!
//! Currently only request tracing; see [`trace::Trace`].

pub mod trace;

pub use trace::Trace;
