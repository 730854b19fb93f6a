//! AHP Engine - Analytic Hierarchy Process decision support
//!
//! This crate implements multi-criteria decision making through pairwise
//! comparisons: reciprocal comparison matrices, priority vectors, consistency
//! checking, and weighted aggregation into a final ranking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
