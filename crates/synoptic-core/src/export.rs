//! JSON export of one diagram layout for rendering frontends.
//!
//! The export is a flat, display-ready view: every positioned node with its
//! element name, family, gas label, coordinates, and valve state. Ids are
//! deliberately absent; the export is for drawing, not for editing.

use crate::element::{NodeKind, ValveState};
use crate::error::FacilityError;
use crate::facility::{Facility, LayoutScope};
use crate::id::LayoutId;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LayoutExport {
    pub name: String,
    /// `"site"` or `"floor"`.
    pub scope: &'static str,
    /// Floor name for floor-scoped layouts.
    pub floor: Option<String>,
    pub nodes: Vec<ExportedNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedNode {
    pub name: String,
    pub kind: &'static str,
    pub gas: &'static str,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    /// `"open"` / `"closed"` for valves, absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valve_state: Option<&'static str>,
}

impl LayoutExport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Build the display view of a layout. Only positioned nodes appear; node
/// order follows id order, so repeated exports of the same state are
/// byte-identical.
pub fn export_layout(
    facility: &Facility,
    layout: LayoutId,
) -> Result<LayoutExport, FacilityError> {
    let l = facility
        .layout(layout)
        .ok_or(FacilityError::LayoutNotFound(layout))?;
    let (scope, floor) = match l.scope {
        LayoutScope::Site => ("site", None),
        LayoutScope::Floor(floor) => (
            "floor",
            facility.floor(floor).map(|f| f.name.clone()),
        ),
    };

    let mut nodes = Vec::new();
    for (node, position) in facility.positions_on(layout) {
        let Some(element) = facility.element_of(node) else {
            continue;
        };
        let kind = match element.node_kind() {
            NodeKind::Source => "source",
            NodeKind::Valve => "valve",
            NodeKind::Fitting => "fitting",
        };
        let valve_state = element.valve_state().map(|s| match s {
            ValveState::Open => "open",
            ValveState::Closed => "closed",
        });
        nodes.push(ExportedNode {
            name: element.name.clone(),
            kind,
            gas: element.gas_type.label(),
            x: position.x,
            y: position.y,
            rotation: position.rotation,
            valve_state,
        });
    }

    Ok(LayoutExport {
        name: l.name.clone(),
        scope,
        floor,
        nodes,
    })
}
