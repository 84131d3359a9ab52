#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spherical distance primitives and project proximity resolution.
//!
//! [`distance`] holds the great-circle math (haversine on a 6371 km
//! sphere) for points, segments, and polylines. [`proximity`] applies it
//! to a project catalog to find the projects within a relevance radius of
//! a query point. Everything here is pure and synchronous.

pub mod distance;
pub mod proximity;

use thiserror::Error;

/// Errors from geometry and proximity computations.
///
/// Both variants indicate bad input or a defect, never a transient
/// condition; callers should not retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A path geometry with too few vertices to form a segment.
    #[error("Invalid geometry: path has {vertex_count} vertices, expected at least 2")]
    InvalidGeometry {
        /// Number of vertices supplied.
        vertex_count: usize,
    },

    /// An internal invariant was violated (e.g. a negative distance).
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the violated invariant.
        message: String,
    },
}
