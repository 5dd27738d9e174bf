//! # jury-core
//!
//! Core types, criterion scoring, and error types for jury voting.
//!
//! This crate provides the foundational types shared across all jury crates:
//! - Entity structs for contestants, jury votes, and vote history
//! - The closed set of scoring criteria
//! - Score drafts and composite score derivation
//! - Juror identity passed between the auth and session layers
//! - Cross-cutting error types
//! - Read-model responses (progress statistics, list position)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod responses;
pub mod scoring;
