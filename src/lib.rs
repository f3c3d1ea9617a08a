//! Rank Sherpa - Multi-Criteria Decision Analysis Engine
//!
//! This crate implements the quantitative core of a transparent MCDM
//! pipeline: AHP pairwise weighting with consistency diagnostics, TOPSIS
//! ranking by closeness to ideal solutions, and weight sensitivity sweeps
//! for rank-stability analysis.

pub mod config;
pub mod domain;
