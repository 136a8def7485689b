//! microc-util - Shared compiler infrastructure.
//!
//! This crate provides the pieces every other phase depends on:
//! source location tracking ([`Span`]) and the diagnostic sink
//! ([`Handler`], [`Diagnostic`], [`Level`]).

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::Span;
