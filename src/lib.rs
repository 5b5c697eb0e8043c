// src/lib.rs
// =============================================================================
// Crate root. The binary in main.rs is a thin shell over these modules so
// integration tests can drive the same pipeline the CLI runs.
//
// Module map:
// - cli:         clap argument surface
// - config:      validated, read-only run configuration
// - scanner:     link extraction (markdown + HTML anchor passes)
// - resolver:    liveness checking and Wayback archive lookup
// - rewrite:     per-document state, substitution, persistence
// - report:      shared run-wide accumulator and report rendering
// - notify:      report delivery (webhook or stdout)
// - coordinator: discovery, bounded fan-out, aggregation
// - error:       typed pipeline error taxonomy
// =============================================================================

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod notify;
pub mod report;
pub mod resolver;
pub mod rewrite;
pub mod scanner;
