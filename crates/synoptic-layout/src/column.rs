//! Schematic column layout for a site's gas network.
//!
//! The planner turns the containment hierarchy into the classic synoptic
//! arrangement: buildings side by side, one vertical column per gas inside
//! each building, floors as horizontal bands from the top floor down, and
//! the equipment of each (gas, floor) cell stacked inside its column.
//!
//! # Design
//!
//! The pass is a pure function of the store and a [`LayoutConfig`]: no
//! randomness, no iteration-order dependence (grouping goes through
//! `BTreeMap`/`BTreeSet`, ties break on ids), so the same facility always
//! plans the same positions. It never writes to the store; pushing the plan
//! onto a layout is [`crate::bridge::apply_auto_layout`]'s job.

use std::collections::{BTreeMap, BTreeSet};
use synoptic_core::{Facility, GasType, NodeId, SiteId};

/// Spacing knobs for the column planner, in diagram units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Top-left corner of the first building's area.
    pub start_x: f64,
    pub start_y: f64,
    /// Horizontal room reserved per building.
    pub building_width: f64,
    /// Gap between adjacent buildings.
    pub building_spacing: f64,
    /// Vertical room reserved per floor band.
    pub floor_height: f64,
    /// Gap between adjacent floor bands.
    pub floor_spacing: f64,
    /// Width reserved per gas column.
    pub column_width: f64,
    /// Gap between adjacent gas columns.
    pub column_spacing: f64,
    /// Vertical step between stacked nodes in one (gas, floor) cell.
    pub valve_spacing: f64,
    /// Inset of the first column from the building's left edge.
    pub column_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            start_y: 100.0,
            building_width: 640.0,
            building_spacing: 160.0,
            floor_height: 220.0,
            floor_spacing: 40.0,
            column_width: 120.0,
            column_spacing: 40.0,
            valve_spacing: 60.0,
            column_margin: 40.0,
        }
    }
}

/// A planned diagram position. Rotation is always 0; the planner draws
/// everything upright.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlannedPosition {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// Per-building working set: each node with its resolved floor number and
/// gas. `None` as the floor number means a building-level node.
type BuildingNodes = Vec<(NodeId, Option<i32>, GasType)>;

/// Plan column positions for every building-anchored node of `site`.
///
/// - Buildings occupy horizontal areas in id order.
/// - Inside a building, each gas present gets one column, in canonical
///   gas order (oxygen leftmost); a node's column X depends only on its
///   building and gas.
/// - Floor bands run top floor first; floors sharing a number share a
///   band, and only floors that hold nodes consume one. Building-level
///   nodes (anchored to the building but no floor) get a band above the
///   top floor. Zone-anchored nodes fall into their zone's floor band.
/// - Within a (gas, band) cell, nodes stack downward by `valve_spacing`
///   in id order.
///
/// Total: an unknown site or a site with no placeable nodes yields an
/// empty plan. Nodes anchored to nothing below the site keep their manual
/// positions and do not appear in the result.
pub fn compute_column_layout(
    facility: &Facility,
    site: SiteId,
    config: &LayoutConfig,
) -> BTreeMap<NodeId, PlannedPosition> {
    let mut by_building: BTreeMap<_, BuildingNodes> = BTreeMap::new();

    for (id, node) in facility.nodes() {
        if node.site != site {
            continue;
        }
        // Resolve the effective floor (directly anchored, or through the
        // zone) and from it the effective building.
        let floor = node.placement.floor.or_else(|| {
            node.placement
                .zone
                .and_then(|z| facility.zone(z))
                .map(|z| z.floor)
        });
        let building = node.placement.building.or_else(|| {
            floor
                .and_then(|f| facility.floor(f))
                .map(|f| f.building)
        });
        let Some(building) = building else {
            continue;
        };
        let Some(element) = facility.element_of(id) else {
            continue;
        };
        let number = floor.and_then(|f| facility.floor(f)).map(|f| f.number);
        by_building
            .entry(building)
            .or_default()
            .push((id, number, element.gas_type));
    }

    let mut plan = BTreeMap::new();

    for (i, nodes) in by_building.values().enumerate() {
        let building_x =
            config.start_x + i as f64 * (config.building_width + config.building_spacing);

        // One column per gas present, canonical order left to right.
        let gases: BTreeSet<GasType> = nodes.iter().map(|&(_, _, gas)| gas).collect();
        let column_x: BTreeMap<GasType, f64> = gases
            .iter()
            .enumerate()
            .map(|(j, &gas)| {
                (
                    gas,
                    building_x
                        + config.column_margin
                        + j as f64 * (config.column_width + config.column_spacing),
                )
            })
            .collect();

        // Band ranking: building-level band first (when occupied), then
        // occupied floor numbers from highest to lowest.
        let numbers: BTreeSet<i32> = nodes.iter().filter_map(|&(_, n, _)| n).collect();
        let has_building_band = nodes.iter().any(|&(_, n, _)| n.is_none());
        let offset = usize::from(has_building_band);
        let mut band_of: BTreeMap<Option<i32>, usize> = BTreeMap::new();
        if has_building_band {
            band_of.insert(None, 0);
        }
        for (k, &n) in numbers.iter().rev().enumerate() {
            band_of.insert(Some(n), offset + k);
        }

        let mut sorted = nodes.clone();
        sorted.sort_by_key(|&(id, _, _)| id);

        // Stack index per (band, gas) cell.
        let mut stacked: BTreeMap<(usize, GasType), usize> = BTreeMap::new();
        for (id, number, gas) in sorted {
            let band = band_of[&number];
            let slot = stacked.entry((band, gas)).or_insert(0);
            let y = config.start_y
                + band as f64 * (config.floor_height + config.floor_spacing)
                + *slot as f64 * config.valve_spacing;
            *slot += 1;
            plan.insert(
                id,
                PlannedPosition {
                    x: column_x[&gas],
                    y,
                    rotation: 0.0,
                },
            );
        }
    }

    plan
}

// ===========================================================================
// Tests
// ===========================================================================
