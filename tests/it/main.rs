//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead.
//!
//! Structure:
//! - helpers: Builders and fixtures shared by all tests
//! - integration: Multi-component workflow tests (session, files on disk)
//! - unit: Single-component unit tests

mod helpers;
