use slotmap::new_key_type;

new_key_type! {
    /// Identifies a site, the root of the containment hierarchy.
    pub struct SiteId;

    /// Identifies a building within a site.
    pub struct BuildingId;

    /// Identifies a floor within a building.
    pub struct FloorId;

    /// Identifies a zone within a floor.
    pub struct ZoneId;

    /// Identifies a placed equipment node.
    pub struct NodeId;

    /// Identifies the typed element record backing a node.
    pub struct ElementId;

    /// Identifies a directed connection between two nodes.
    pub struct ConnectionId;

    /// Identifies a named diagram surface.
    pub struct LayoutId;

    /// Identifies a media attachment on an element.
    pub struct MediaId;
}
