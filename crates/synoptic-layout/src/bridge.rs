//! Pushing planned positions back into the facility store.
//!
//! The planner side of this crate is pure; this module is the one place
//! that writes. Application is all-or-nothing: every (layout, node) pair is
//! validated before the first position is written, so a stale plan cannot
//! leave a layout half-updated.

use crate::column::{LayoutConfig, PlannedPosition, compute_column_layout};
use std::collections::BTreeMap;
use synoptic_core::{Facility, FacilityError, LayoutId, NodeId, NodePosition, SiteId};

/// Write a plan onto a layout. Returns the number of positions written.
///
/// Fails without writing anything when the layout is missing, any planned
/// node no longer exists, or a node belongs to a different site than the
/// layout.
pub fn apply_auto_layout(
    facility: &mut Facility,
    layout: LayoutId,
    plan: &BTreeMap<NodeId, PlannedPosition>,
) -> Result<usize, FacilityError> {
    let layout_site = facility
        .layout(layout)
        .ok_or(FacilityError::LayoutNotFound(layout))?
        .site;
    for &node in plan.keys() {
        let node_site = facility
            .node(node)
            .ok_or(FacilityError::NodeNotFound(node))?
            .site;
        if node_site != layout_site {
            return Err(FacilityError::InvalidPlacement(
                "node and layout belong to different sites",
            ));
        }
    }

    for (&node, p) in plan {
        facility.set_node_position(
            layout,
            node,
            NodePosition {
                x: p.x,
                y: p.y,
                rotation: p.rotation,
            },
        )?;
    }
    Ok(plan.len())
}

/// Plan the column layout for `site` and apply it to `layout` in one step.
pub fn apply_column_layout(
    facility: &mut Facility,
    site: SiteId,
    layout: LayoutId,
    config: &LayoutConfig,
) -> Result<usize, FacilityError> {
    let plan = compute_column_layout(facility, site, config);
    apply_auto_layout(facility, layout, &plan)
}
