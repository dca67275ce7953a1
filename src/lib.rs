//! Rekrut - a command-line client for a recruitment portal
//!
//! This library provides the core functionality for Rekrut, including:
//! - Data models for job postings, applications, and selection stages
//! - The stage progress projector that decides what an applicant sees
//! - Participant card layout and PDF rendering
//! - The portal HTTP client with per-view cancellation
//! - CLI command parsing and execution
//!
//! # Example
//!
//! ```no_run
//! use rekrut::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod api;
pub mod card;
pub mod cli;
pub mod config;
pub mod models;
pub mod progress;
pub mod utils;
