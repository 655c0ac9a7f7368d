//! Cascade deletion: dependency sweeps over the containment hierarchy.
//!
//! Deleting a site, building, floor, or zone takes everything anchored under
//! it: descendant hierarchy rows, the nodes placed there, their elements and
//! media, every connection touching a swept node, floor-scoped layouts of
//! swept floors, and all position rows of swept nodes or layouts.
//!
//! # Design
//!
//! - [`compute_dependencies`] resolves the full sweep into a [`CascadePlan`]
//!   without mutating anything, so callers can show the user exactly what a
//!   delete will take with it before confirming.
//! - [`cascade_delete`] resolves the same plan and then applies it in one
//!   pass. The plan is fully materialized before the first removal, so a
//!   delete either happens completely or not at all.
//! - The two-step confirm flow is [`begin_cascade`] / [`commit_cascade`] /
//!   [`abort_cascade`]: while a cascade is pending, every mutation inside the
//!   affected site fails with `CascadeInProgress`, which keeps the plan the
//!   user confirmed identical to the one that runs.

use crate::error::FacilityError;
use crate::facility::{Facility, LayoutScope};
use crate::id::*;
use std::collections::BTreeSet;

/// The anchor of a cascade delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeScope {
    Site(SiteId),
    Building(BuildingId),
    Floor(FloorId),
    Zone(ZoneId),
}

impl CascadeScope {
    /// The site this scope lives in, if the anchor still exists.
    pub fn site(&self, facility: &Facility) -> Option<SiteId> {
        match *self {
            CascadeScope::Site(site) => facility.site(site).map(|_| site),
            CascadeScope::Building(b) => facility.building(b).map(|b| b.site),
            CascadeScope::Floor(f) => facility.site_of_floor(f),
            CascadeScope::Zone(z) => {
                let floor = facility.zone(z)?.floor;
                facility.site_of_floor(floor)
            }
        }
    }
}

/// Everything a cascade delete will remove, resolved ahead of time.
///
/// Id lists are sorted, so two plans over the same state compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    pub scope: CascadeScope,
    pub buildings: Vec<BuildingId>,
    pub floors: Vec<FloorId>,
    pub zones: Vec<ZoneId>,
    pub nodes: Vec<NodeId>,
    pub elements: Vec<ElementId>,
    pub connections: Vec<ConnectionId>,
    pub layouts: Vec<LayoutId>,
    pub media: Vec<MediaId>,
    /// Position rows swept because their node or layout is swept.
    pub positions: usize,
}

impl CascadePlan {
    /// Total number of rows the cascade removes, the anchor itself excluded.
    pub fn total(&self) -> usize {
        self.buildings.len()
            + self.floors.len()
            + self.zones.len()
            + self.nodes.len()
            + self.elements.len()
            + self.connections.len()
            + self.layouts.len()
            + self.media.len()
            + self.positions
    }

    /// Human-readable counts for a confirmation prompt, e.g.
    /// `"2 floors, 1 zone, 14 nodes, 12 connections, 3 diagram positions"`.
    pub fn summary(&self) -> String {
        fn push(parts: &mut Vec<String>, n: usize, singular: &str, plural: &str) {
            if n > 0 {
                let noun = if n == 1 { singular } else { plural };
                parts.push(format!("{n} {noun}"));
            }
        }
        let mut parts = Vec::new();
        push(&mut parts, self.buildings.len(), "building", "buildings");
        push(&mut parts, self.floors.len(), "floor", "floors");
        push(&mut parts, self.zones.len(), "zone", "zones");
        push(&mut parts, self.nodes.len(), "node", "nodes");
        push(&mut parts, self.connections.len(), "connection", "connections");
        push(&mut parts, self.layouts.len(), "layout", "layouts");
        push(&mut parts, self.media.len(), "media file", "media files");
        push(
            &mut parts,
            self.positions,
            "diagram position",
            "diagram positions",
        );
        if parts.is_empty() {
            return "nothing else".to_string();
        }
        parts.join(", ")
    }
}

/// Resolve everything a cascade over `scope` would delete, without mutating.
///
/// Fails only when the anchor entity does not exist.
pub fn compute_dependencies(
    facility: &Facility,
    scope: CascadeScope,
) -> Result<CascadePlan, FacilityError> {
    // Swept hierarchy rows, deepest membership checks first.
    let mut buildings = BTreeSet::new();
    let mut floors = BTreeSet::new();
    let mut zones = BTreeSet::new();
    let mut site_scope = None;

    match scope {
        CascadeScope::Site(site) => {
            if facility.site(site).is_none() {
                return Err(FacilityError::SiteNotFound(site));
            }
            site_scope = Some(site);
            for (id, b) in facility.buildings() {
                if b.site == site {
                    buildings.insert(id);
                }
            }
        }
        CascadeScope::Building(building) => {
            if facility.building(building).is_none() {
                return Err(FacilityError::BuildingNotFound(building));
            }
            buildings.insert(building);
        }
        CascadeScope::Floor(floor) => {
            if facility.floor(floor).is_none() {
                return Err(FacilityError::FloorNotFound(floor));
            }
            floors.insert(floor);
        }
        CascadeScope::Zone(zone) => {
            if facility.zone(zone).is_none() {
                return Err(FacilityError::ZoneNotFound(zone));
            }
            zones.insert(zone);
        }
    }

    // Descend: floors of swept buildings, zones of swept floors. For a
    // building-anchored scope the building itself is in `buildings` but is
    // only a swept row when the scope is a site (the anchor is reported
    // separately by the caller's delete).
    for (id, f) in facility.floors() {
        if buildings.contains(&f.building) {
            floors.insert(id);
        }
    }
    for (id, z) in facility.zones() {
        if floors.contains(&z.floor) {
            zones.insert(id);
        }
    }

    // Nodes: anchored to the scope directly, or to any swept hierarchy row.
    // A node anchored only at the site level is swept by a site cascade.
    let mut nodes = BTreeSet::new();
    let mut elements = BTreeSet::new();
    for (id, n) in facility.nodes() {
        let swept = match scope {
            CascadeScope::Site(site) => n.site == site,
            _ => {
                n.placement.building.is_some_and(|b| buildings.contains(&b))
                    || n.placement.floor.is_some_and(|f| floors.contains(&f))
                    || n.placement.zone.is_some_and(|z| zones.contains(&z))
            }
        };
        if swept {
            nodes.insert(id);
            elements.insert(n.element);
        }
    }

    // Connections touching any swept node go with it.
    let mut connections = BTreeSet::new();
    for (id, c) in facility.connections() {
        if nodes.contains(&c.from) || nodes.contains(&c.to) {
            connections.insert(id);
        }
    }

    // Layouts: all of the site's layouts for a site cascade, floor-scoped
    // layouts of swept floors otherwise.
    let mut layouts = BTreeSet::new();
    for (id, l) in facility.layouts() {
        let swept = match (site_scope, l.scope) {
            (Some(site), _) => l.site == site,
            (None, LayoutScope::Floor(floor)) => floors.contains(&floor),
            (None, LayoutScope::Site) => false,
        };
        if swept {
            layouts.insert(id);
        }
    }

    let mut media = BTreeSet::new();
    for (id, m) in facility.media.iter() {
        if elements.contains(&m.element) {
            media.insert(id);
        }
    }

    let positions = facility
        .positions
        .keys()
        .filter(|(l, n)| layouts.contains(l) || nodes.contains(n))
        .count();

    // The anchor building of a building cascade was only a membership helper.
    if !matches!(scope, CascadeScope::Site(_)) {
        buildings.clear();
    }
    if matches!(scope, CascadeScope::Floor(_)) {
        floors.clear();
    }
    if matches!(scope, CascadeScope::Zone(_)) {
        zones.clear();
    }

    Ok(CascadePlan {
        scope,
        buildings: buildings.into_iter().collect(),
        floors: floors.into_iter().collect(),
        zones: zones.into_iter().collect(),
        nodes: nodes.into_iter().collect(),
        elements: elements.into_iter().collect(),
        connections: connections.into_iter().collect(),
        layouts: layouts.into_iter().collect(),
        media: media.into_iter().collect(),
        positions,
    })
}

/// Delete `scope` and everything [`compute_dependencies`] resolves under it.
///
/// The plan is materialized before the first removal; a failure (missing
/// anchor, conflicting pending cascade) leaves the store untouched. Returns
/// the applied plan.
pub fn cascade_delete(
    facility: &mut Facility,
    scope: CascadeScope,
) -> Result<CascadePlan, FacilityError> {
    // A different pending cascade over the same site blocks this one. The
    // pending cascade itself is what a commit runs.
    if let Some(pending) = facility.pending_cascade
        && pending != scope
        && pending.site(facility) == scope.site(facility)
    {
        return Err(FacilityError::CascadeInProgress);
    }

    let plan = compute_dependencies(facility, scope)?;

    for &id in &plan.connections {
        facility.connections.remove(id);
    }
    facility.positions.retain(|(l, n), _| {
        plan.layouts.binary_search(l).is_err() && plan.nodes.binary_search(n).is_err()
    });
    for &id in &plan.media {
        facility.media.remove(id);
    }
    for &id in &plan.elements {
        facility.elements.remove(id);
    }
    for &id in &plan.nodes {
        facility.nodes.remove(id);
    }
    for &id in &plan.layouts {
        facility.layouts.remove(id);
    }
    for &id in &plan.zones {
        facility.zones.remove(id);
    }
    for &id in &plan.floors {
        facility.floors.remove(id);
    }
    for &id in &plan.buildings {
        facility.buildings.remove(id);
    }

    // Finally the anchor itself.
    match scope {
        CascadeScope::Site(site) => {
            facility.sites.remove(site);
        }
        CascadeScope::Building(b) => {
            facility.buildings.remove(b);
        }
        CascadeScope::Floor(f) => {
            facility.floors.remove(f);
        }
        CascadeScope::Zone(z) => {
            facility.zones.remove(z);
        }
    }

    if facility.pending_cascade == Some(scope) {
        facility.pending_cascade = None;
    }
    facility.cache.invalidate_all();
    Ok(plan)
}

/// Start a two-step cascade delete: resolve the plan and lock the affected
/// site against other mutations until [`commit_cascade`] or
/// [`abort_cascade`].
pub fn begin_cascade(
    facility: &mut Facility,
    scope: CascadeScope,
) -> Result<CascadePlan, FacilityError> {
    if facility.pending_cascade.is_some() {
        return Err(FacilityError::CascadeInProgress);
    }
    let plan = compute_dependencies(facility, scope)?;
    facility.pending_cascade = Some(scope);
    Ok(plan)
}

/// Run the pending cascade and release the lock.
pub fn commit_cascade(facility: &mut Facility) -> Result<CascadePlan, FacilityError> {
    let scope = facility
        .pending_cascade
        .ok_or(FacilityError::NoPendingCascade)?;
    cascade_delete(facility, scope)
}

/// Drop the pending cascade without deleting anything.
pub fn abort_cascade(facility: &mut Facility) -> Result<(), FacilityError> {
    if facility.pending_cascade.take().is_none() {
        return Err(FacilityError::NoPendingCascade);
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
