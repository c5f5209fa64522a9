//! Crate test suite
//!
//! Platform fakes live in `fakes`; the remaining modules exercise one layer
//! each, from the modal controller up to runtime dispatch.

#[cfg(test)]
mod integration;
#[cfg(test)]
mod property_tests;
