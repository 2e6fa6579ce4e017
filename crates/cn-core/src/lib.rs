//! # cn-core
//!
//! Core types, validation, and error types for Casenote.
//!
//! This crate provides the foundational types shared across all Casenote crates:
//! - Entity structs for clients and every note type
//! - Status, filter, and ordering enums plus listing filters
//! - Create payloads with field-level validation
//! - Cross-cutting error types
//! - Report row types and calendar-month bucketing

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filters;
pub mod nullable;
pub mod payloads;
pub mod reports;
pub mod validation;
