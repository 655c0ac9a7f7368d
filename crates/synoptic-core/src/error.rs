//! Error types for facility store operations.
//!
//! Every failure is a typed variant the caller can match on and turn into an
//! actionable message; none of these represent transient conditions worth
//! retrying.

use crate::gas::GasType;
use crate::id::*;

/// Errors from hierarchy, network, layout, and cascade operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FacilityError {
    #[error("site not found: {0:?}")]
    SiteNotFound(SiteId),
    #[error("building not found: {0:?}")]
    BuildingNotFound(BuildingId),
    #[error("floor not found: {0:?}")]
    FloorNotFound(FloorId),
    #[error("zone not found: {0:?}")]
    ZoneNotFound(ZoneId),
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    #[error("element not found: {0:?}")]
    ElementNotFound(ElementId),
    #[error("connection not found: {0:?}")]
    ConnectionNotFound(ConnectionId),
    #[error("layout not found: {0:?}")]
    LayoutNotFound(LayoutId),
    #[error("media not found: {0:?}")]
    MediaNotFound(MediaId),

    /// A connection would mix gas types. `expected` is the gas supplied for
    /// the connection, `found` the gas of the offending endpoint element.
    #[error("connection would mix gas types: expected {expected:?}, endpoint carries {found:?}")]
    GasTypeMismatch { expected: GasType, found: GasType },

    #[error("a node cannot be connected to itself")]
    SelfConnection,

    /// The identical directed edge already exists. The reverse direction is
    /// a distinct, legal connection.
    #[error("an identical connection already exists: {0:?}")]
    DuplicateConnection(ConnectionId),

    /// The supplied building/floor/zone anchors disagree with each other or
    /// with the node's site. The store never auto-corrects the triple.
    #[error("inconsistent placement: {0}")]
    InvalidPlacement(&'static str),

    /// A cascade delete has been started (and not yet committed or aborted)
    /// over a scope that covers the entity being mutated.
    #[error("a cascade delete is in progress over this scope")]
    CascadeInProgress,

    /// `commit_cascade` or `abort_cascade` called with nothing pending.
    #[error("no cascade delete is pending")]
    NoPendingCascade,

    /// The targeted element is not a valve.
    #[error("element is not a valve: {0:?}")]
    NotAValve(ElementId),
}
