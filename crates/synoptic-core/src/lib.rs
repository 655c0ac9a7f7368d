//! Core data model for medical gas distribution networks.
//!
//! This crate is the store layer of a synoptic-diagram tool for hospital
//! gas installations: the containment hierarchy (site, building, floor,
//! zone), the equipment network (nodes backed by typed elements, directed
//! gas-typed connections), named diagram layouts with per-layout node
//! positions, and media attachments.
//!
//! # Design
//!
//! - All state lives in one [`Facility`] value; there is no interior
//!   mutability and no global registry. Entities are addressed by slotmap
//!   keys, so stale ids fail lookups instead of aliasing recycled rows.
//! - Mutations validate the cross-entity invariants up front (gas-type
//!   homogeneity of connections, placement consistency, parent existence)
//!   and either apply completely or leave the store untouched.
//! - Subtree deletion is a two-phase cascade: [`cascade::compute_dependencies`]
//!   resolves the full sweep for a confirmation prompt, and
//!   [`cascade::cascade_delete`] (or the [`cascade::begin_cascade`] /
//!   [`cascade::commit_cascade`] pair) applies it atomically.
//! - Persistence is a versioned binary snapshot of the whole store
//!   ([`Facility::to_snapshot_bytes`]); diagram frontends consume the JSON
//!   view in [`export`].

mod cache;
pub mod cascade;
pub mod element;
pub mod error;
pub mod export;
pub mod facility;
pub mod gas;
pub mod id;
pub mod snapshot;

pub use cascade::{CascadePlan, CascadeScope};
pub use element::{
    Element, ElementDetail, ElementSpec, FittingKind, NodeKind, ValveKind, ValveState,
};
pub use error::FacilityError;
pub use facility::{
    Building, Connection, Facility, Floor, GeoPoint, Layout, LayoutScope, Media, MediaKind,
    Node, NodePosition, Patch, Placement, PlacementPatch, Site, Zone,
};
pub use gas::GasType;
pub use id::{
    BuildingId, ConnectionId, ElementId, FloorId, LayoutId, MediaId, NodeId, SiteId, ZoneId,
};
