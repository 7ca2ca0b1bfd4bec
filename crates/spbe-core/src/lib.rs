//! # spbe-core
//!
//! Core types and error types for the SPBE evidence workflow.
//!
//! This crate provides the foundational types shared across all SPBE crates:
//! - Entity structs for reference data (units, domains, aspects, indicators)
//!   and workflow data (profiles, evidence, verification log entries)
//! - The closed `Role` enumeration and the `VerificationStatus` lifecycle
//! - ID prefix constants and blob path rules
//! - Cross-cutting error types
//! - HTTP response types

pub mod blob;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
