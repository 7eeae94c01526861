//! Core types and utilities for the dataenc encoding toolkit
//!
//! This crate provides the shared error types and result aliases
//! used throughout the dataenc workspace.

pub mod error;

pub use error::{ArmorError, ArmorResult, CodecError, CodecResult};
