//! Integration tests for the facility store.
//!
//! These exercise end-to-end flows across the store: building up a realistic
//! hospital hierarchy, wiring gas runs, cascading deletes with the two-step
//! confirm flow, snapshot round-trips, and layout exports.

use synoptic_core::cascade::{
    CascadeScope, abort_cascade, begin_cascade, cascade_delete, commit_cascade,
    compute_dependencies,
};
use synoptic_core::export::export_layout;
use synoptic_core::*;

/// A two-building hospital: Main has floors 1-3 with an ICU zone on 2,
/// Annex has a ground floor. Oxygen runs from a site-level plant up the
/// Main riser; vacuum serves the ICU.
struct Hospital {
    facility: Facility,
    site: SiteId,
    main: BuildingId,
    annex: BuildingId,
    floor2: FloorId,
    icu: ZoneId,
    o2_plant: NodeId,
    o2_riser: NodeId,
    o2_icu: NodeId,
    vac_pump: NodeId,
    vac_icu: NodeId,
}

fn hospital() -> Hospital {
    let mut f = Facility::new();
    let site = f.create_site("General Hospital", "1 Care Way", None);
    let main = f.create_building(site, "Main", None).unwrap();
    let annex = f.create_building(site, "Annex", None).unwrap();
    let _floor1 = f.create_floor(main, 1, "First").unwrap();
    let floor2 = f.create_floor(main, 2, "Second").unwrap();
    let _floor3 = f.create_floor(main, 3, "Third").unwrap();
    f.create_floor(annex, 0, "Ground").unwrap();
    let icu = f.create_zone(floor2, "ICU").unwrap();

    let at = |building: Option<BuildingId>, floor: Option<FloorId>, zone: Option<ZoneId>| {
        Placement { building, floor, zone }
    };

    let o2_plant = f
        .create_node(site, "O2 plant", GasType::Oxygen, ElementSpec::Source,
            at(None, None, None), None)
        .unwrap();
    let o2_riser = f
        .create_node(site, "Main O2 riser valve", GasType::Oxygen,
            ElementSpec::Valve(ValveKind::Isolation),
            at(Some(main), Some(floor2), None), None)
        .unwrap();
    let o2_icu = f
        .create_node(site, "ICU O2 area valve", GasType::Oxygen,
            ElementSpec::Valve(ValveKind::AreaService),
            at(Some(main), Some(floor2), Some(icu)), None)
        .unwrap();
    let vac_pump = f
        .create_node(site, "vacuum pump", GasType::Vacuum, ElementSpec::Source,
            at(Some(main), None, None), None)
        .unwrap();
    let vac_icu = f
        .create_node(site, "ICU vacuum valve", GasType::Vacuum,
            ElementSpec::Valve(ValveKind::AreaService),
            at(Some(main), Some(floor2), Some(icu)), None)
        .unwrap();

    f.connect(o2_plant, o2_riser, GasType::Oxygen, Some(42)).unwrap();
    f.connect(o2_riser, o2_icu, GasType::Oxygen, Some(22)).unwrap();
    f.connect(vac_pump, vac_icu, GasType::Vacuum, None).unwrap();

    Hospital {
        facility: f,
        site,
        main,
        annex,
        floor2,
        icu,
        o2_plant,
        o2_riser,
        o2_icu,
        vac_pump,
        vac_icu,
    }
}

// ===========================================================================
// Test 1: gas-type homogeneity across a whole run
// ===========================================================================

#[test]
fn cross_gas_connections_are_rejected_everywhere() {
    let mut h = hospital();
    // Vacuum pump into the oxygen riser, both argument orders.
    for (a, b) in [(h.vac_pump, h.o2_riser), (h.o2_riser, h.vac_pump)] {
        for gas in [GasType::Oxygen, GasType::Vacuum] {
            assert!(matches!(
                h.facility.connect(a, b, gas, None),
                Err(FacilityError::GasTypeMismatch { .. })
            ));
        }
    }
    // The existing network is untouched.
    assert_eq!(h.facility.connections().count(), 3);
}

// ===========================================================================
// Test 2: cascade preview matches what the delete removes
// ===========================================================================

#[test]
fn cascade_preview_matches_applied_delete() {
    let mut h = hospital();
    let plan = compute_dependencies(&h.facility, CascadeScope::Floor(h.floor2)).unwrap();

    // Floor 2 holds the riser and both ICU valves (through the zone).
    let mut expected = vec![h.o2_riser, h.o2_icu, h.vac_icu];
    expected.sort();
    assert_eq!(plan.nodes, expected);
    assert_eq!(plan.zones, vec![h.icu]);
    // All three connections touch a swept node.
    assert_eq!(plan.connections.len(), 3);

    let applied = cascade_delete(&mut h.facility, CascadeScope::Floor(h.floor2)).unwrap();
    assert_eq!(plan, applied);

    // Survivors: the site-level plant and the building-level pump, with no
    // dangling connections.
    assert!(h.facility.node(h.o2_plant).is_some());
    assert!(h.facility.node(h.vac_pump).is_some());
    assert_eq!(h.facility.connections().count(), 0);
    assert!(h.facility.floor(h.floor2).is_none());
    assert!(h.facility.zone(h.icu).is_none());
}

// ===========================================================================
// Test 3: two-step confirm flow locks the site
// ===========================================================================

#[test]
fn pending_cascade_locks_until_commit_or_abort() {
    let mut h = hospital();
    let planned = begin_cascade(&mut h.facility, CascadeScope::Building(h.main)).unwrap();
    assert!(planned.summary().contains("3 floors"), "{}", planned.summary());

    // The locked site rejects mutations, including valve toggles.
    assert_eq!(
        h.facility.set_valve_state(h.o2_riser, ValveState::Open),
        Err(FacilityError::CascadeInProgress)
    );
    assert_eq!(
        h.facility.create_building(h.site, "Wing C", None),
        Err(FacilityError::CascadeInProgress)
    );

    abort_cascade(&mut h.facility).unwrap();
    // After the abort everything works and nothing was deleted.
    h.facility.set_valve_state(h.o2_riser, ValveState::Open).unwrap();
    assert!(h.facility.building(h.main).is_some());

    // Begin again and commit this time.
    let planned = begin_cascade(&mut h.facility, CascadeScope::Building(h.main)).unwrap();
    let applied = commit_cascade(&mut h.facility).unwrap();
    assert_eq!(planned, applied);
    assert!(h.facility.building(h.main).is_none());
    assert!(h.facility.building(h.annex).is_some());
}

// ===========================================================================
// Test 4: snapshot round-trip of a full hospital
// ===========================================================================

#[test]
fn snapshot_round_trip_preserves_a_full_hospital() {
    let mut h = hospital();
    let layout = h
        .facility
        .create_layout(h.site, "overview", LayoutScope::Site)
        .unwrap();
    h.facility
        .set_node_position(layout, h.o2_riser, NodePosition { x: 180.0, y: 320.0, rotation: 0.0 })
        .unwrap();
    let element = h.facility.node(h.o2_riser).unwrap().element;
    h.facility
        .attach_media(element, MediaKind::Photo, "riser.jpg")
        .unwrap();

    let bytes = h.facility.to_snapshot_bytes().unwrap();
    let mut restored = Facility::from_snapshot_bytes(&bytes).unwrap();

    // Old ids resolve, relationships are intact, mutations still validate.
    assert_eq!(restored.node(h.o2_icu).unwrap().placement.zone, Some(h.icu));
    assert_eq!(restored.position(layout, h.o2_riser).unwrap().x, 180.0);
    assert_eq!(restored.media_for(element).count(), 1);
    assert!(matches!(
        restored.connect(h.vac_pump, h.o2_riser, GasType::Vacuum, None),
        Err(FacilityError::GasTypeMismatch { .. })
    ));
    // And a cascade on the restored store still sweeps cleanly.
    cascade_delete(&mut restored, CascadeScope::Site(h.site)).unwrap();
    assert_eq!(restored.nodes().count(), 0);
}

// ===========================================================================
// Test 5: layout export for the frontend
// ===========================================================================

#[test]
fn export_carries_names_gas_labels_and_valve_states() {
    let mut h = hospital();
    h.facility.set_valve_state(h.o2_riser, ValveState::Open).unwrap();
    let layout = h
        .facility
        .create_layout(h.site, "overview", LayoutScope::Site)
        .unwrap();
    for (i, node) in [h.o2_plant, h.o2_riser, h.vac_icu].into_iter().enumerate() {
        h.facility
            .set_node_position(
                layout,
                node,
                NodePosition { x: i as f64 * 100.0, y: 0.0, rotation: 0.0 },
            )
            .unwrap();
    }

    let export = export_layout(&h.facility, layout).unwrap();
    assert_eq!(export.nodes.len(), 3);
    let riser = export
        .nodes
        .iter()
        .find(|n| n.name == "Main O2 riser valve")
        .unwrap();
    assert_eq!(riser.gas, "O2");
    assert_eq!(riser.valve_state, Some("open"));
    let plant = export.nodes.iter().find(|n| n.name == "O2 plant").unwrap();
    assert_eq!(plant.kind, "source");
    assert_eq!(plant.valve_state, None);
}

// ===========================================================================
// Test 6: deleting and rebuilding reuses nothing stale
// ===========================================================================

#[test]
fn stale_ids_fail_lookups_after_delete() {
    let mut h = hospital();
    let old_riser = h.o2_riser;
    h.facility.delete_node(old_riser).unwrap();
    assert!(h.facility.node(old_riser).is_none());

    // A new node may reuse the slot, but the stale id (old version) must
    // not resolve to it.
    let replacement = h
        .facility
        .create_node(
            h.site,
            "replacement riser valve",
            GasType::Oxygen,
            ElementSpec::Valve(ValveKind::Isolation),
            Placement { building: Some(h.main), floor: Some(h.floor2), zone: None },
            None,
        )
        .unwrap();
    assert!(h.facility.node(old_riser).is_none());
    assert!(h.facility.node(replacement).is_some());
    // Connections that referenced the old riser are gone.
    assert_eq!(h.facility.connections().count(), 1);
}
