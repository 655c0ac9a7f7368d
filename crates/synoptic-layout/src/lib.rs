//! Diagram generation for medical gas networks: automatic column layout
//! and orthogonal connector routing.
//!
//! Everything in this crate except [`bridge`] is a pure function of a
//! [`synoptic_core::Facility`] and a handful of spacing constants, so a
//! diagram regenerated from the same store is identical down to the byte.
//! Routing is local to each connector's two ports; there is no global
//! search and no collision avoidance.

pub mod bridge;
pub mod column;
pub mod geometry;
pub mod router;

pub use bridge::{apply_auto_layout, apply_column_layout};
pub use column::{LayoutConfig, PlannedPosition, compute_column_layout};
pub use geometry::{Point, Polyline, Side};
pub use router::{ELBOW_OFFSET, MIN_GAP, route_orthogonal, route_orthogonal_path};
