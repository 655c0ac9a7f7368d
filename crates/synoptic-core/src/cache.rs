//! Lazily rebuilt child listings over the containment hierarchy.
//!
//! The hierarchy is stored flat (each row points at its parent), so "all
//! floors of building X" is a scan. These listings are asked for constantly
//! by tree views and the auto-layout pass, so the store keeps per-relation
//! indexes that are dropped wholesale on any mutation of that relation and
//! rebuilt on the next read. `None` means stale.

use crate::facility::Facility;
use crate::id::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub(crate) struct ChildCache {
    buildings_by_site: Option<BTreeMap<SiteId, Vec<BuildingId>>>,
    floors_by_building: Option<BTreeMap<BuildingId, Vec<FloorId>>>,
    zones_by_floor: Option<BTreeMap<FloorId, Vec<ZoneId>>>,
    positions_by_layout: Option<BTreeMap<LayoutId, usize>>,
}

impl ChildCache {
    pub(crate) fn invalidate_buildings(&mut self) {
        self.buildings_by_site = None;
    }

    pub(crate) fn invalidate_floors(&mut self) {
        self.floors_by_building = None;
    }

    pub(crate) fn invalidate_zones(&mut self) {
        self.zones_by_floor = None;
    }

    pub(crate) fn invalidate_positions(&mut self) {
        self.positions_by_layout = None;
    }

    pub(crate) fn invalidate_all(&mut self) {
        self.buildings_by_site = None;
        self.floors_by_building = None;
        self.zones_by_floor = None;
        self.positions_by_layout = None;
    }
}

impl Facility {
    /// Buildings of a site, sorted by id. Empty for unknown sites.
    pub fn buildings_of(&mut self, site: SiteId) -> &[BuildingId] {
        if self.cache.buildings_by_site.is_none() {
            let mut map: BTreeMap<SiteId, Vec<BuildingId>> = BTreeMap::new();
            for (id, b) in self.buildings.iter() {
                map.entry(b.site).or_default().push(id);
            }
            for children in map.values_mut() {
                children.sort();
            }
            self.cache.buildings_by_site = Some(map);
        }
        self.cache
            .buildings_by_site
            .as_ref()
            .and_then(|m| m.get(&site))
            .map_or(&[][..], |v| v.as_slice())
    }

    /// Floors of a building, sorted by floor number then id.
    pub fn floors_of(&mut self, building: BuildingId) -> &[FloorId] {
        if self.cache.floors_by_building.is_none() {
            let mut map: BTreeMap<BuildingId, Vec<FloorId>> = BTreeMap::new();
            for (id, f) in self.floors.iter() {
                map.entry(f.building).or_default().push(id);
            }
            for children in map.values_mut() {
                children.sort_by_key(|&id| (self.floors[id].number, id));
            }
            self.cache.floors_by_building = Some(map);
        }
        self.cache
            .floors_by_building
            .as_ref()
            .and_then(|m| m.get(&building))
            .map_or(&[][..], |v| v.as_slice())
    }

    /// Zones of a floor, sorted by id.
    pub fn zones_of(&mut self, floor: FloorId) -> &[ZoneId] {
        if self.cache.zones_by_floor.is_none() {
            let mut map: BTreeMap<FloorId, Vec<ZoneId>> = BTreeMap::new();
            for (id, z) in self.zones.iter() {
                map.entry(z.floor).or_default().push(id);
            }
            for children in map.values_mut() {
                children.sort();
            }
            self.cache.zones_by_floor = Some(map);
        }
        self.cache
            .zones_by_floor
            .as_ref()
            .and_then(|m| m.get(&floor))
            .map_or(&[][..], |v| v.as_slice())
    }

    /// How many nodes are positioned on a layout. Zero for unknown layouts.
    pub fn position_count_of(&mut self, layout: LayoutId) -> usize {
        if self.cache.positions_by_layout.is_none() {
            let mut map: BTreeMap<LayoutId, usize> = BTreeMap::new();
            for (l, _) in self.positions.keys() {
                *map.entry(*l).or_insert(0) += 1;
            }
            self.cache.positions_by_layout = Some(map);
        }
        self.cache
            .positions_by_layout
            .as_ref()
            .and_then(|m| m.get(&layout))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_listed_by_number() {
        let mut f = Facility::new();
        let site = f.create_site("s", "a", None);
        let b = f.create_building(site, "B", None).unwrap();
        let f3 = f.create_floor(b, 3, "Third").unwrap();
        let fb = f.create_floor(b, -1, "Basement").unwrap();
        let f1 = f.create_floor(b, 1, "First").unwrap();

        assert_eq!(f.floors_of(b), &[fb, f1, f3]);
    }

    #[test]
    fn listings_refresh_after_mutation() {
        let mut f = Facility::new();
        let site = f.create_site("s", "a", None);
        let b1 = f.create_building(site, "B1", None).unwrap();
        assert_eq!(f.buildings_of(site), &[b1]);

        // Second read after a create sees the new row.
        let b2 = f.create_building(site, "B2", None).unwrap();
        let mut expected = vec![b1, b2];
        expected.sort();
        assert_eq!(f.buildings_of(site), expected.as_slice());
    }

    #[test]
    fn position_counts_track_layout_edits() {
        use crate::element::{ElementSpec, ValveKind};
        use crate::facility::{LayoutScope, NodePosition, Placement};
        use crate::gas::GasType;

        let mut f = Facility::new();
        let site = f.create_site("s", "a", None);
        let node = f
            .create_node(
                site,
                "valve",
                GasType::Oxygen,
                ElementSpec::Valve(ValveKind::Isolation),
                Placement::default(),
                None,
            )
            .unwrap();
        let layout = f.create_layout(site, "l", LayoutScope::Site).unwrap();
        assert_eq!(f.position_count_of(layout), 0);

        f.set_node_position(layout, node, NodePosition { x: 0.0, y: 0.0, rotation: 0.0 })
            .unwrap();
        assert_eq!(f.position_count_of(layout), 1);

        f.clear_node_position(layout, node).unwrap();
        assert_eq!(f.position_count_of(layout), 0);
    }

    #[test]
    fn unknown_parents_list_empty() {
        let mut f = Facility::new();
        assert!(f.buildings_of(SiteId::default()).is_empty());
        assert!(f.floors_of(BuildingId::default()).is_empty());
        assert!(f.zones_of(FloorId::default()).is_empty());
    }
}
