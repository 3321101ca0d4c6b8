// src/checker/mod.rs
// =============================================================================
// This module contains all site checking logic.
//
// Submodules:
// - probe: Decides whether ONE site is online (HEAD over http, then https)
// - runner: Runs the probe over MANY sites, sequentially or concurrently
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod probe;
mod runner;

// Re-export public items from submodules
// This lets users write `checker::check_sequential()` instead of
// `checker::runner::check_sequential()`
pub use probe::{ProbeOutcome, Prober, ReqwestHead, SiteProber, Target};
pub use runner::{check_concurrent, check_sequential, CheckResult};
