//! # uni-core
//!
//! Core types and error types for unidash.
//!
//! This crate provides the foundational types shared across all unidash crates:
//! - Entity records for the seven managed resources (colleges, departments,
//!   students, KPIs, publications, research projects, project expenses)
//! - Enumerated backend values with their wire labels and CLI aliases
//! - The [`resource::Resource`] trait binding a record to its REST path,
//!   parent entity, and form schema
//! - Form state, required-field validation, and payload building
//! - Dashboard summary, upload, and auth response types
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod form;
pub mod resource;
pub mod responses;
pub mod session;

mod de;
