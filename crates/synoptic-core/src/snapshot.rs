//! Whole-store snapshots in a compact binary format.
//!
//! A snapshot captures every persistent table of a [`Facility`]: the
//! hierarchy, the network, layouts, positions, and media. Transient state
//! (the child-listing cache, a pending cascade) is deliberately not part of
//! the format; a restored store comes up with a cold cache and no pending
//! cascade.
//!
//! The magic/version header is a raw 8-byte prefix ahead of the encoded
//! payload, so it is checked before any decoding: a snapshot from an
//! incompatible future version fails with `UnsupportedVersion`, never with
//! a decode error from a mismatched payload shape.

use crate::cache::ChildCache;
use crate::element::Element;
use crate::facility::{
    Building, Connection, Facility, Floor, Layout, Media, Node, NodePosition, Site, Zone,
};
use crate::id::*;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::BTreeMap;

/// First four bytes of every snapshot ("SYN" + format generation).
pub const SNAPSHOT_MAGIC: u32 = 0x53594E01;

/// Bumped on any incompatible change to the snapshot payload.
pub const FORMAT_VERSION: u32 = 1;

/// Raw prefix length: magic + version, both little-endian u32.
const HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
}

impl SnapshotHeader {
    fn current() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
        }
    }

    fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..].copy_from_slice(&self.version.to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < HEADER_LEN {
            return Err(SnapshotError::Truncated);
        }
        let mut magic = [0u8; 4];
        let mut version = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        version.copy_from_slice(&bytes[4..HEADER_LEN]);
        Ok(Self {
            magic: u32::from_le_bytes(magic),
            version: u32::from_le_bytes(version),
        })
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(SnapshotError::BadMagic { found: self.magic });
        }
        if self.version != FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is shorter than its header")]
    Truncated,
    #[error("not a facility snapshot (magic {found:#010x})")]
    BadMagic { found: u32 },
    #[error("unsupported snapshot version {found} (current is {FORMAT_VERSION})")]
    UnsupportedVersion { found: u32 },
    #[error("snapshot encoding failed: {0}")]
    Encode(String),
    #[error("snapshot decoding failed: {0}")]
    Decode(String),
}

/// The serialized shape of a facility. Kept separate from [`Facility`] so
/// the in-memory struct can carry transient fields without versioning them.
#[derive(Serialize, Deserialize)]
struct FacilitySnapshot {
    sites: SlotMap<SiteId, Site>,
    buildings: SlotMap<BuildingId, Building>,
    floors: SlotMap<FloorId, Floor>,
    zones: SlotMap<ZoneId, Zone>,
    nodes: SlotMap<NodeId, Node>,
    elements: SlotMap<ElementId, Element>,
    connections: SlotMap<ConnectionId, Connection>,
    layouts: SlotMap<LayoutId, Layout>,
    media: SlotMap<MediaId, Media>,
    positions: BTreeMap<(LayoutId, NodeId), NodePosition>,
}

impl Facility {
    /// Serialize the full persistent state.
    pub fn to_snapshot_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let snapshot = FacilitySnapshot {
            sites: self.sites.clone(),
            buildings: self.buildings.clone(),
            floors: self.floors.clone(),
            zones: self.zones.clone(),
            nodes: self.nodes.clone(),
            elements: self.elements.clone(),
            connections: self.connections.clone(),
            layouts: self.layouts.clone(),
            media: self.media.clone(),
            positions: self.positions.clone(),
        };
        let body =
            bitcode::serialize(&snapshot).map_err(|e| SnapshotError::Encode(e.to_string()))?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
        bytes.extend_from_slice(&SnapshotHeader::current().to_bytes());
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Restore a facility from [`Self::to_snapshot_bytes`] output. All ids
    /// (slot and version) survive the round trip, so references held by
    /// callers stay valid against the restored store.
    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        SnapshotHeader::from_bytes(bytes)?.validate()?;
        let snapshot: FacilitySnapshot = bitcode::deserialize(&bytes[HEADER_LEN..])
            .map_err(|e| SnapshotError::Decode(e.to_string()))?;
        Ok(Facility {
            sites: snapshot.sites,
            buildings: snapshot.buildings,
            floors: snapshot.floors,
            zones: snapshot.zones,
            nodes: snapshot.nodes,
            elements: snapshot.elements,
            connections: snapshot.connections,
            layouts: snapshot.layouts,
            media: snapshot.media,
            positions: snapshot.positions,
            pending_cascade: None,
            cache: ChildCache::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementSpec, ValveKind, ValveState};
    use crate::facility::{LayoutScope, Placement};
    use crate::gas::GasType;

    fn sample() -> (Facility, NodeId, LayoutId) {
        let mut f = Facility::new();
        let site = f.create_site("General Hospital", "1 Care Way", None);
        let b = f.create_building(site, "Main", None).unwrap();
        let floor = f.create_floor(b, 1, "First").unwrap();
        let valve = f
            .create_node(
                site,
                "riser valve",
                GasType::Oxygen,
                ElementSpec::Valve(ValveKind::Isolation),
                Placement {
                    building: Some(b),
                    floor: Some(floor),
                    zone: None,
                },
                None,
            )
            .unwrap();
        f.set_valve_state(valve, ValveState::Open).unwrap();
        let layout = f.create_layout(site, "overview", LayoutScope::Site).unwrap();
        f.set_node_position(
            layout,
            valve,
            NodePosition { x: 120.0, y: 340.0, rotation: 90.0 },
        )
        .unwrap();
        (f, valve, layout)
    }

    #[test]
    fn round_trip_preserves_state_and_ids() {
        let (f, valve, layout) = sample();
        let bytes = f.to_snapshot_bytes().unwrap();
        let restored = Facility::from_snapshot_bytes(&bytes).unwrap();

        // Ids minted before the snapshot resolve in the restored store.
        assert_eq!(
            restored.element_of(valve).unwrap().valve_state(),
            Some(ValveState::Open)
        );
        let pos = restored.position(layout, valve).unwrap();
        assert_eq!((pos.x, pos.y, pos.rotation), (120.0, 340.0, 90.0));
        assert_eq!(restored.nodes().count(), f.nodes().count());
    }

    #[test]
    fn restored_store_accepts_mutations() {
        let (f, _, _) = sample();
        let bytes = f.to_snapshot_bytes().unwrap();
        let mut restored = Facility::from_snapshot_bytes(&bytes).unwrap();
        assert!(restored.pending_cascade.is_none());
        let site = restored.sites().next().map(|(id, _)| id).unwrap();
        assert!(restored.create_building(site, "Annex", None).is_ok());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let (f, _, _) = sample();
        let mut bytes = f.to_snapshot_bytes().unwrap();
        bytes[..4].copy_from_slice(&0xDEADBEEFu32.to_le_bytes());
        assert_eq!(
            Facility::from_snapshot_bytes(&bytes).unwrap_err(),
            SnapshotError::BadMagic { found: 0xDEADBEEF }
        );
    }

    #[test]
    fn future_versions_fail_before_any_decode() {
        let (f, _, _) = sample();
        let mut bytes = f.to_snapshot_bytes().unwrap();
        bytes[4..8].copy_from_slice(&(FORMAT_VERSION + 1).to_le_bytes());
        // Garbage where the payload would be: the version check must win.
        bytes.truncate(HEADER_LEN);
        bytes.extend_from_slice(&[0xFF; 16]);
        assert_eq!(
            Facility::from_snapshot_bytes(&bytes).unwrap_err(),
            SnapshotError::UnsupportedVersion {
                found: FORMAT_VERSION + 1
            }
        );
    }

    #[test]
    fn short_and_garbage_inputs_fail_cleanly() {
        assert_eq!(
            Facility::from_snapshot_bytes(&[0x00, 0x01, 0x02]).unwrap_err(),
            SnapshotError::Truncated
        );

        // Valid header, corrupt payload.
        let mut bytes = SnapshotHeader::current().to_bytes().to_vec();
        bytes.extend_from_slice(&[0xAB; 7]);
        assert!(matches!(
            Facility::from_snapshot_bytes(&bytes),
            Err(SnapshotError::Decode(_))
        ));
    }
}
