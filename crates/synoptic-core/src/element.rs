//! Typed element records backing equipment nodes.
//!
//! Every placed [`Node`](crate::facility::Node) references exactly one
//! `Element`. The three element families (valve, source, fitting) share the
//! `{site, name, gas_type}` header and diverge on a tagged-union `detail`
//! payload. Type-specific behavior switches on the tag exhaustively, so a
//! fourth family is a compile-time-checked addition rather than a duck-typed
//! field probe.

use crate::gas::GasType;
use crate::id::SiteId;
use serde::{Deserialize, Serialize};

/// Coarse equipment family, mirrored on the owning node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Source,
    Valve,
    Fitting,
}

/// What role a valve plays in the distribution network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValveKind {
    /// Main isolation valve for a riser or branch.
    Isolation,
    /// Area service valve feeding a ward or zone.
    AreaService,
    /// Maintenance shutoff next to a piece of equipment.
    Maintenance,
    /// Emergency cutoff, normally sealed.
    Emergency,
}

/// Open/closed state of a valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValveState {
    Open,
    Closed,
}

/// Pipe fitting geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FittingKind {
    Tee,
    Elbow,
    Coupling,
    Reducer,
}

/// Caller-supplied element description at node creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementSpec {
    Source,
    Valve(ValveKind),
    Fitting(FittingKind),
}

/// The type-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementDetail {
    Source,
    Valve { kind: ValveKind, state: ValveState },
    Fitting { kind: FittingKind },
}

impl ElementDetail {
    /// Build the detail payload for a freshly created element.
    ///
    /// Valves start `Closed`; the other families carry no mutable state.
    pub fn from_spec(spec: ElementSpec) -> Self {
        match spec {
            ElementSpec::Source => ElementDetail::Source,
            ElementSpec::Valve(kind) => ElementDetail::Valve {
                kind,
                state: ValveState::Closed,
            },
            ElementSpec::Fitting(kind) => ElementDetail::Fitting { kind },
        }
    }

    /// The equipment family this payload belongs to.
    pub fn node_kind(&self) -> NodeKind {
        match self {
            ElementDetail::Source => NodeKind::Source,
            ElementDetail::Valve { .. } => NodeKind::Valve,
            ElementDetail::Fitting { .. } => NodeKind::Fitting,
        }
    }
}

/// A typed element record. Referenced by exactly one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Owning site.
    pub site: SiteId,
    /// Display name ("O2 riser valve L3", ...).
    pub name: String,
    /// The gas this element carries. Connection validation compares
    /// endpoint elements against this field.
    pub gas_type: GasType,
    /// Type-specific payload.
    pub detail: ElementDetail,
}

impl Element {
    pub fn node_kind(&self) -> NodeKind {
        self.detail.node_kind()
    }

    /// Current valve state, if this element is a valve.
    pub fn valve_state(&self) -> Option<ValveState> {
        match &self.detail {
            ElementDetail::Valve { state, .. } => Some(*state),
            ElementDetail::Source | ElementDetail::Fitting { .. } => None,
        }
    }
}
