//! The facility store: hierarchy, network, and layout entities.
//!
//! A [`Facility`] owns every entity of one installation database: the
//! containment tree (site -> building -> floor -> zone), the equipment
//! network (nodes, their typed elements, directed connections), the named
//! diagram layouts with per-(layout, node) positions, and media attachments.
//!
//! # Design
//!
//! - Entities live in `SlotMap`s keyed by the ids in [`crate::id`];
//!   positions live in a `BTreeMap` keyed by `(LayoutId, NodeId)` so a node
//!   can appear on several layouts with independent coordinates.
//! - Every mutation validates the cross-entity invariants before touching
//!   state: parents must exist, placement triples must agree, connections
//!   must not mix gas types. The store validates but never auto-corrects.
//! - Destruction of whole subtrees goes through [`crate::cascade`]; the
//!   fine-grained deletes here (node, connection, layout, media) orphan-clean
//!   their dependent rows themselves.

use crate::cache::ChildCache;
use crate::cascade::CascadeScope;
use crate::element::{Element, ElementDetail, ElementSpec, NodeKind, ValveState};
use crate::error::FacilityError;
use crate::gas::GasType;
use crate::id::*;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Hierarchy entities
// ---------------------------------------------------------------------------

/// A WGS84 coordinate attached to sites, buildings, or nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Root of the containment hierarchy. Owns everything transitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub address: String,
    pub geo: Option<GeoPoint>,
}

/// A building within a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub site: SiteId,
    pub name: String,
    pub geo: Option<GeoPoint>,
}

/// A floor within a building. Numbers are signed (basements) and sortable
/// but not required to be unique within the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub building: BuildingId,
    pub number: i32,
    pub name: String,
}

/// A zone within a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub floor: FloorId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Network entities
// ---------------------------------------------------------------------------

/// Where a node is anchored in the hierarchy, coarsest to finest. Any suffix
/// may be absent: a node can hang off the site alone, a building, a floor,
/// or a zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub building: Option<BuildingId>,
    pub floor: Option<FloorId>,
    pub zone: Option<ZoneId>,
}

/// A placed equipment instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Owning site.
    pub site: SiteId,
    /// Equipment family, mirrors the element's tag.
    pub kind: NodeKind,
    /// The typed element record backing this node (1:1).
    pub element: ElementId,
    /// Hierarchy anchor.
    pub placement: Placement,
    /// Direct coordinate, independent of any map-derived one.
    pub geo: Option<GeoPoint>,
}

/// A directed edge between two nodes, carrying one gas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    /// Must equal the gas type of both endpoint elements.
    pub gas_type: GasType,
    /// Pipe diameter in millimetres, when surveyed.
    pub diameter_mm: Option<u16>,
}

// ---------------------------------------------------------------------------
// Layout entities
// ---------------------------------------------------------------------------

/// What a layout surface covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutScope {
    /// The whole site.
    Site,
    /// A single floor.
    Floor(FloorId),
}

/// A named diagram surface. Node positions are per-layout, never global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub site: SiteId,
    pub name: String,
    pub scope: LayoutScope,
}

/// Position of one node on one layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    Document,
}

/// An attachment on an element. Display-only; not part of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub element: ElementId,
    pub kind: MediaKind,
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// Placement patching
// ---------------------------------------------------------------------------

/// A three-way field update: leave untouched, clear to none, or set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T: Copy> Patch<T> {
    fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }
}

/// Partial update of a node's hierarchy anchor. Any subset of fields may be
/// set or cleared; the store validates the resulting triple and never
/// backfills missing ancestors on the caller's behalf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementPatch {
    pub building: Patch<BuildingId>,
    pub floor: Patch<FloorId>,
    pub zone: Patch<ZoneId>,
}

// ---------------------------------------------------------------------------
// Facility
// ---------------------------------------------------------------------------

/// The root store for one installation database.
#[derive(Debug, Clone, Default)]
pub struct Facility {
    pub(crate) sites: SlotMap<SiteId, Site>,
    pub(crate) buildings: SlotMap<BuildingId, Building>,
    pub(crate) floors: SlotMap<FloorId, Floor>,
    pub(crate) zones: SlotMap<ZoneId, Zone>,
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) elements: SlotMap<ElementId, Element>,
    pub(crate) connections: SlotMap<ConnectionId, Connection>,
    pub(crate) layouts: SlotMap<LayoutId, Layout>,
    pub(crate) media: SlotMap<MediaId, Media>,
    pub(crate) positions: BTreeMap<(LayoutId, NodeId), NodePosition>,
    /// Scope of a begun-but-unconfirmed cascade delete, if any.
    pub(crate) pending_cascade: Option<CascadeScope>,
    /// Lazily rebuilt child listings. Never serialized.
    pub(crate) cache: ChildCache,
}

impl Facility {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Hierarchy creation
    // -----------------------------------------------------------------------

    pub fn create_site(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
        geo: Option<GeoPoint>,
    ) -> SiteId {
        self.sites.insert(Site {
            name: name.into(),
            address: address.into(),
            geo,
        })
    }

    pub fn create_building(
        &mut self,
        site: SiteId,
        name: impl Into<String>,
        geo: Option<GeoPoint>,
    ) -> Result<BuildingId, FacilityError> {
        if !self.sites.contains_key(site) {
            return Err(FacilityError::SiteNotFound(site));
        }
        self.ensure_unlocked(site)?;
        let id = self.buildings.insert(Building {
            site,
            name: name.into(),
            geo,
        });
        self.cache.invalidate_buildings();
        Ok(id)
    }

    pub fn create_floor(
        &mut self,
        building: BuildingId,
        number: i32,
        name: impl Into<String>,
    ) -> Result<FloorId, FacilityError> {
        let site = self
            .buildings
            .get(building)
            .ok_or(FacilityError::BuildingNotFound(building))?
            .site;
        self.ensure_unlocked(site)?;
        let id = self.floors.insert(Floor {
            building,
            number,
            name: name.into(),
        });
        self.cache.invalidate_floors();
        Ok(id)
    }

    pub fn create_zone(
        &mut self,
        floor: FloorId,
        name: impl Into<String>,
    ) -> Result<ZoneId, FacilityError> {
        let site = self
            .site_of_floor(floor)
            .ok_or(FacilityError::FloorNotFound(floor))?;
        self.ensure_unlocked(site)?;
        let id = self.zones.insert(Zone {
            floor,
            name: name.into(),
        });
        self.cache.invalidate_zones();
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Hierarchy updates
    // -----------------------------------------------------------------------

    pub fn rename_site(
        &mut self,
        site: SiteId,
        name: impl Into<String>,
    ) -> Result<(), FacilityError> {
        if !self.sites.contains_key(site) {
            return Err(FacilityError::SiteNotFound(site));
        }
        self.ensure_unlocked(site)?;
        self.sites[site].name = name.into();
        Ok(())
    }

    pub fn set_site_address(
        &mut self,
        site: SiteId,
        address: impl Into<String>,
    ) -> Result<(), FacilityError> {
        if !self.sites.contains_key(site) {
            return Err(FacilityError::SiteNotFound(site));
        }
        self.ensure_unlocked(site)?;
        self.sites[site].address = address.into();
        Ok(())
    }

    pub fn rename_building(
        &mut self,
        building: BuildingId,
        name: impl Into<String>,
    ) -> Result<(), FacilityError> {
        let site = self
            .buildings
            .get(building)
            .ok_or(FacilityError::BuildingNotFound(building))?
            .site;
        self.ensure_unlocked(site)?;
        self.buildings[building].name = name.into();
        Ok(())
    }

    pub fn rename_floor(
        &mut self,
        floor: FloorId,
        name: impl Into<String>,
    ) -> Result<(), FacilityError> {
        let site = self
            .site_of_floor(floor)
            .ok_or(FacilityError::FloorNotFound(floor))?;
        self.ensure_unlocked(site)?;
        self.floors[floor].name = name.into();
        Ok(())
    }

    /// Change a floor's number. Listings sorted by floor number pick up the
    /// new order on their next read.
    pub fn set_floor_number(
        &mut self,
        floor: FloorId,
        number: i32,
    ) -> Result<(), FacilityError> {
        let site = self
            .site_of_floor(floor)
            .ok_or(FacilityError::FloorNotFound(floor))?;
        self.ensure_unlocked(site)?;
        self.floors[floor].number = number;
        self.cache.invalidate_floors();
        Ok(())
    }

    pub fn rename_zone(
        &mut self,
        zone: ZoneId,
        name: impl Into<String>,
    ) -> Result<(), FacilityError> {
        let floor = self
            .zones
            .get(zone)
            .ok_or(FacilityError::ZoneNotFound(zone))?
            .floor;
        let site = self
            .site_of_floor(floor)
            .ok_or(FacilityError::FloorNotFound(floor))?;
        self.ensure_unlocked(site)?;
        self.zones[zone].name = name.into();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Node + element creation
    // -----------------------------------------------------------------------

    /// Create a node together with its backing element.
    ///
    /// The placement anchors are validated against the hierarchy but not
    /// backfilled: supplying a zone without its floor, or a floor from a
    /// different building than the one given, is the caller's error.
    pub fn create_node(
        &mut self,
        site: SiteId,
        name: impl Into<String>,
        gas_type: GasType,
        spec: ElementSpec,
        placement: Placement,
        geo: Option<GeoPoint>,
    ) -> Result<NodeId, FacilityError> {
        if !self.sites.contains_key(site) {
            return Err(FacilityError::SiteNotFound(site));
        }
        self.ensure_unlocked(site)?;
        self.validate_placement(site, &placement)?;

        let detail = ElementDetail::from_spec(spec);
        let kind = detail.node_kind();
        let element = self.elements.insert(Element {
            site,
            name: name.into(),
            gas_type,
            detail,
        });
        Ok(self.nodes.insert(Node {
            site,
            kind,
            element,
            placement,
            geo,
        }))
    }

    /// Apply a partial placement update. The patched triple is validated as
    /// a whole before anything is committed.
    pub fn update_node_placement(
        &mut self,
        node: NodeId,
        patch: PlacementPatch,
    ) -> Result<(), FacilityError> {
        let (site, current) = {
            let n = self.nodes.get(node).ok_or(FacilityError::NodeNotFound(node))?;
            (n.site, n.placement)
        };
        self.ensure_unlocked(site)?;

        let next = Placement {
            building: patch.building.apply(current.building),
            floor: patch.floor.apply(current.floor),
            zone: patch.zone.apply(current.zone),
        };
        self.validate_placement(site, &next)?;

        if let Some(n) = self.nodes.get_mut(node) {
            n.placement = next;
        }
        Ok(())
    }

    /// Flip a valve open or closed. Fails on non-valve elements.
    pub fn set_valve_state(
        &mut self,
        node: NodeId,
        state: ValveState,
    ) -> Result<(), FacilityError> {
        let (site, element) = {
            let n = self.nodes.get(node).ok_or(FacilityError::NodeNotFound(node))?;
            (n.site, n.element)
        };
        self.ensure_unlocked(site)?;
        let elem = self
            .elements
            .get_mut(element)
            .ok_or(FacilityError::ElementNotFound(element))?;
        match &mut elem.detail {
            ElementDetail::Valve { state: current, .. } => {
                *current = state;
                Ok(())
            }
            ElementDetail::Source | ElementDetail::Fitting { .. } => {
                Err(FacilityError::NotAValve(element))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Connections
    // -----------------------------------------------------------------------

    /// Connect two nodes with a directed, gas-typed edge.
    ///
    /// Rejects self-connections, gas-type mixing against either endpoint
    /// element, and exact-direction duplicates. A reverse-direction edge
    /// between the same pair is a distinct, legal connection.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        gas_type: GasType,
        diameter_mm: Option<u16>,
    ) -> Result<ConnectionId, FacilityError> {
        if from == to {
            return Err(FacilityError::SelfConnection);
        }
        let from_node = self.nodes.get(from).ok_or(FacilityError::NodeNotFound(from))?;
        let to_node = self.nodes.get(to).ok_or(FacilityError::NodeNotFound(to))?;
        if from_node.site != to_node.site {
            return Err(FacilityError::InvalidPlacement(
                "connection endpoints belong to different sites",
            ));
        }
        let site = from_node.site;
        let from_element = from_node.element;
        let to_element = to_node.element;
        self.ensure_unlocked(site)?;

        for element in [from_element, to_element] {
            let found = self
                .elements
                .get(element)
                .ok_or(FacilityError::ElementNotFound(element))?
                .gas_type;
            if found != gas_type {
                return Err(FacilityError::GasTypeMismatch {
                    expected: gas_type,
                    found,
                });
            }
        }

        if let Some((existing, _)) = self
            .connections
            .iter()
            .find(|(_, c)| c.from == from && c.to == to)
        {
            return Err(FacilityError::DuplicateConnection(existing));
        }

        Ok(self.connections.insert(Connection {
            from,
            to,
            gas_type,
            diameter_mm,
        }))
    }

    pub fn delete_connection(&mut self, connection: ConnectionId) -> Result<(), FacilityError> {
        let site = {
            let c = self
                .connections
                .get(connection)
                .ok_or(FacilityError::ConnectionNotFound(connection))?;
            self.nodes.get(c.from).map(|n| n.site)
        };
        if let Some(site) = site {
            self.ensure_unlocked(site)?;
        }
        self.connections.remove(connection);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Layouts and positions
    // -----------------------------------------------------------------------

    pub fn create_layout(
        &mut self,
        site: SiteId,
        name: impl Into<String>,
        scope: LayoutScope,
    ) -> Result<LayoutId, FacilityError> {
        if !self.sites.contains_key(site) {
            return Err(FacilityError::SiteNotFound(site));
        }
        self.ensure_unlocked(site)?;
        if let LayoutScope::Floor(floor) = scope {
            let floor_site = self
                .site_of_floor(floor)
                .ok_or(FacilityError::FloorNotFound(floor))?;
            if floor_site != site {
                return Err(FacilityError::InvalidPlacement(
                    "layout floor belongs to a different site",
                ));
            }
        }
        Ok(self.layouts.insert(Layout {
            site,
            name: name.into(),
            scope,
        }))
    }

    /// Place (or move) a node on a layout. Coordinates are per-(layout, node).
    pub fn set_node_position(
        &mut self,
        layout: LayoutId,
        node: NodeId,
        position: NodePosition,
    ) -> Result<(), FacilityError> {
        let layout_site = self
            .layouts
            .get(layout)
            .ok_or(FacilityError::LayoutNotFound(layout))?
            .site;
        let node_site = self
            .nodes
            .get(node)
            .ok_or(FacilityError::NodeNotFound(node))?
            .site;
        if layout_site != node_site {
            return Err(FacilityError::InvalidPlacement(
                "node and layout belong to different sites",
            ));
        }
        self.ensure_unlocked(layout_site)?;
        self.positions.insert((layout, node), position);
        self.cache.invalidate_positions();
        Ok(())
    }

    /// Remove a node from a layout. Removing a never-placed node is a no-op.
    pub fn clear_node_position(
        &mut self,
        layout: LayoutId,
        node: NodeId,
    ) -> Result<(), FacilityError> {
        let site = self
            .layouts
            .get(layout)
            .ok_or(FacilityError::LayoutNotFound(layout))?
            .site;
        self.ensure_unlocked(site)?;
        if self.positions.remove(&(layout, node)).is_some() {
            self.cache.invalidate_positions();
        }
        Ok(())
    }

    /// Delete a layout and orphan-clean its position rows.
    pub fn delete_layout(&mut self, layout: LayoutId) -> Result<(), FacilityError> {
        let site = self
            .layouts
            .get(layout)
            .ok_or(FacilityError::LayoutNotFound(layout))?
            .site;
        self.ensure_unlocked(site)?;
        self.layouts.remove(layout);
        self.positions.retain(|(l, _), _| *l != layout);
        self.cache.invalidate_positions();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Media
    // -----------------------------------------------------------------------

    pub fn attach_media(
        &mut self,
        element: ElementId,
        kind: MediaKind,
        file_name: impl Into<String>,
    ) -> Result<MediaId, FacilityError> {
        let site = self
            .elements
            .get(element)
            .ok_or(FacilityError::ElementNotFound(element))?
            .site;
        self.ensure_unlocked(site)?;
        Ok(self.media.insert(Media {
            element,
            kind,
            file_name: file_name.into(),
        }))
    }

    pub fn remove_media(&mut self, media: MediaId) -> Result<(), FacilityError> {
        let element = self
            .media
            .get(media)
            .ok_or(FacilityError::MediaNotFound(media))?
            .element;
        if let Some(site) = self.elements.get(element).map(|e| e.site) {
            self.ensure_unlocked(site)?;
        }
        self.media.remove(media);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Node deletion
    // -----------------------------------------------------------------------

    /// Delete a node, its element, its media, every connection touching it,
    /// and its position rows on every layout.
    pub fn delete_node(&mut self, node: NodeId) -> Result<(), FacilityError> {
        let (site, element) = {
            let n = self.nodes.get(node).ok_or(FacilityError::NodeNotFound(node))?;
            (n.site, n.element)
        };
        self.ensure_unlocked(site)?;

        let stale: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|(_, c)| c.from == node || c.to == node)
            .map(|(id, _)| id)
            .collect();
        for id in stale {
            self.connections.remove(id);
        }
        self.positions.retain(|(_, n), _| *n != node);
        self.cache.invalidate_positions();
        let stale_media: Vec<MediaId> = self
            .media
            .iter()
            .filter(|(_, m)| m.element == element)
            .map(|(id, _)| id)
            .collect();
        for id in stale_media {
            self.media.remove(id);
        }
        self.elements.remove(element);
        self.nodes.remove(node);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Validation helpers
    // -----------------------------------------------------------------------

    /// Check a placement triple against the hierarchy. Cross-checks apply
    /// only between anchors the caller actually supplied.
    fn validate_placement(
        &self,
        site: SiteId,
        placement: &Placement,
    ) -> Result<(), FacilityError> {
        if let Some(building) = placement.building {
            let b = self
                .buildings
                .get(building)
                .ok_or(FacilityError::BuildingNotFound(building))?;
            if b.site != site {
                return Err(FacilityError::InvalidPlacement(
                    "building belongs to a different site",
                ));
            }
        }
        if let Some(floor) = placement.floor {
            let f = self
                .floors
                .get(floor)
                .ok_or(FacilityError::FloorNotFound(floor))?;
            if let Some(building) = placement.building
                && f.building != building
            {
                return Err(FacilityError::InvalidPlacement(
                    "floor is not in the supplied building",
                ));
            }
            match self.site_of_floor(floor) {
                Some(s) if s == site => {}
                _ => {
                    return Err(FacilityError::InvalidPlacement(
                        "floor belongs to a different site",
                    ));
                }
            }
        }
        if let Some(zone) = placement.zone {
            let z = self.zones.get(zone).ok_or(FacilityError::ZoneNotFound(zone))?;
            if let Some(floor) = placement.floor
                && z.floor != floor
            {
                return Err(FacilityError::InvalidPlacement(
                    "zone is not on the supplied floor",
                ));
            }
            match self.site_of_floor(z.floor) {
                Some(s) if s == site => {}
                _ => {
                    return Err(FacilityError::InvalidPlacement(
                        "zone belongs to a different site",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Walk floor -> building -> site.
    pub(crate) fn site_of_floor(&self, floor: FloorId) -> Option<SiteId> {
        let f = self.floors.get(floor)?;
        self.buildings.get(f.building).map(|b| b.site)
    }

    /// Reject mutations inside a site covered by a pending cascade.
    pub(crate) fn ensure_unlocked(&self, site: SiteId) -> Result<(), FacilityError> {
        match self.pending_cascade {
            Some(scope) if scope.site(self) == Some(site) => {
                Err(FacilityError::CascadeInProgress)
            }
            _ => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn site(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(id)
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id)
    }

    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.floors.get(id)
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// The element record backing a node.
    pub fn element_of(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(self.nodes.get(node)?.element)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn layout(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.get(id)
    }

    pub fn media_item(&self, id: MediaId) -> Option<&Media> {
        self.media.get(id)
    }

    pub fn position(&self, layout: LayoutId, node: NodeId) -> Option<&NodePosition> {
        self.positions.get(&(layout, node))
    }

    pub fn sites(&self) -> impl Iterator<Item = (SiteId, &Site)> {
        self.sites.iter()
    }

    pub fn buildings(&self) -> impl Iterator<Item = (BuildingId, &Building)> {
        self.buildings.iter()
    }

    pub fn floors(&self) -> impl Iterator<Item = (FloorId, &Floor)> {
        self.floors.iter()
    }

    pub fn zones(&self) -> impl Iterator<Item = (ZoneId, &Zone)> {
        self.zones.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections.iter()
    }

    pub fn layouts(&self) -> impl Iterator<Item = (LayoutId, &Layout)> {
        self.layouts.iter()
    }

    /// All media attached to one element.
    pub fn media_for(&self, element: ElementId) -> impl Iterator<Item = (MediaId, &Media)> {
        self.media.iter().filter(move |(_, m)| m.element == element)
    }

    /// All positioned nodes on one layout.
    pub fn positions_on(
        &self,
        layout: LayoutId,
    ) -> impl Iterator<Item = (NodeId, &NodePosition)> {
        self.positions
            .iter()
            .filter(move |((l, _), _)| *l == layout)
            .map(|((_, n), p)| (*n, p))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
