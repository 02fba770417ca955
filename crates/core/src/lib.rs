//! Core library for relnotes
//!
//! This crate implements the **Functional Core** of the relnotes application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`relnotes_core`** (this crate): Pure transformation functions with zero I/O
//! - **`relnotes`**: Input reading, configuration and output (the Imperative Shell)
//!
//! All functions in this crate are total over their inputs: an invalid base URL
//! or a line without ticket references is returned unchanged instead of
//! producing an error.
//!
//! # Module Organization
//!
//! - [`tickets`]: Ticket reference matching and markdown link rendering
//! - [`release`]: Release item and release-note document formatting
//!
//! # Example Usage
//!
//! ```rust
//! use relnotes_core::release::build_release_item_text;
//!
//! let base_url = "https://dev.azure.com/parallax-app/Parallax%202023/_workitems/edit/";
//! let line = build_release_item_text("- AB#1234, AB#2345 -  some context", base_url);
//!
//! assert_eq!(
//!     line,
//!     format!("- [AB#1234]({base_url}1234), [AB#2345]({base_url}2345) - some context")
//! );
//! ```

pub mod release;
pub mod tickets;
