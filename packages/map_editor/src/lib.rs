//! Editor shell around the `pfmap` terrain model.
//!
//! Owns the open document explicitly: there is exactly one `Editor`, which
//! owns exactly one `Document`, and creating or loading a map swaps the
//! document out wholesale. Tools get mutable access to the editor for the
//! duration of one input event.

#[macro_use]
extern crate tracing;

pub mod logging;
pub mod settings;
pub mod headless;
pub mod document;
pub mod terrain_tool;
