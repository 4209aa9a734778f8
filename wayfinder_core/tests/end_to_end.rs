// wayfinder_core/tests/end_to_end.rs

use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use nalgebra::Point3;
use wayfinder_core::prelude::*;

struct Camera;

struct Stream {
    live: bool,
}

impl CameraStream for Stream {
    fn resolution(&self) -> (u32, u32) {
        (1280, 720)
    }
    fn stop(&mut self) {
        self.live = false;
    }
    fn is_live(&self) -> bool {
        self.live
    }
}

impl CameraProvider for Camera {
    fn open(&mut self, request: &CameraRequest) -> Result<Box<dyn CameraStream>, CameraError> {
        assert_eq!((request.ideal_width, request.ideal_height), (1280, 720));
        Ok(Box::new(Stream { live: true }))
    }
}

struct NoPrompt;

impl PermissionProvider for NoPrompt {
    fn request(&mut self, _permission: Permission) -> PermissionState {
        PermissionState::NotRequired
    }
}

fn write_floor(root: &Path, folder: &str, locations: &str) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("navmesh.json"), r#"{"vertices":[[0,0,0],[10,0,0],[0,0,10]]}"#).unwrap();
    fs::write(dir.join("locations.json"), locations).unwrap();
}

fn dataset_dir() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write_floor(
        tmp.path(),
        "floor_1",
        r#"[
            {"id":"entrance","name":"Entrance","floor":1,"pos":{"x":0,"y":0,"z":0},"type":"room"},
            {"id":"library","name":"Library","floor":1,"pos":{"x":10,"y":0,"z":0},"type":"room"},
            {"id":"stairs-1","name":"Main Stairs","floor":1,"pos":{"x":0,"z":15},"type":"connector"}
        ]"#,
    );
    write_floor(
        tmp.path(),
        "floor_2",
        r#"[{"id":"office-201","name":"Office 201","floor":"2","pos":{"x":3,"y":4,"z":15},"type":"room"}]"#,
    );
    // Malformed floor: must not block the others.
    let broken = tmp.path().join("floor_3");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("navmesh.json"), "{}").unwrap();
    fs::write(broken.join("locations.json"), "[{\"id\":").unwrap();
    tmp
}

#[test]
fn loads_floors_from_disk_and_reports_failures() {
    let tmp = dataset_dir();
    let source = DirectoryFloorSource::new(tmp.path());
    let mut building = Building::new();

    let report = building.load_floors(
        [FloorId::Level(1), FloorId::Level(2), FloorId::Level(3), FloorId::TestArea],
        &source,
    );

    assert_eq!(report.loaded, vec![FloorId::Level(1), FloorId::Level(2)]);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.status_line(), "Ready. Loaded floors: 1, 2.");
    assert_eq!(building.locations().len(), 4);
    assert_eq!(
        building.floors().get(FloorId::Level(1)).map(|d| d.nav_mesh.vertex_count()),
        Some(3)
    );
    let stairs = building.locations().get("stairs-1").unwrap();
    assert!(stairs.is_connector());
    assert_abs_diff_eq!(stairs.pos.y, 0.0);
}

#[test]
fn same_floor_trip_from_planning_to_exit() {
    let tmp = dataset_dir();
    let mut building = Building::new();
    building
        .load_floor(FloorId::Level(1), &DirectoryFloorSource::new(tmp.path()))
        .unwrap();

    let mut session = NavigationSession::default();
    let preview = session
        .plan(building.locations(), "entrance", "library")
        .unwrap();
    assert_eq!(preview.description, "Entrance → Library");

    let route = session.route().unwrap();
    assert!(route.len() >= 3);
    assert_abs_diff_eq!(route.length(), 10.0, epsilon = 1e-9);

    let sensors = session.start(&mut Camera, &mut NoPrompt).unwrap();
    let frame = session.tick().unwrap();
    assert_abs_diff_eq!(frame.distance_to_destination, 10.0);

    // Face +x and take two steps.
    sensors
        .orientation(OrientationSample::from_alpha(90.0, 0))
        .unwrap();
    for (t, m) in [(500, 9.0), (550, 14.0), (600, 9.2), (1000, 9.0), (1050, 13.0), (1100, 9.1)] {
        sensors.motion(AccelSample::new(0.0, m, 0.0, t)).unwrap();
    }
    let frame = session.tick().unwrap();
    assert_eq!(frame.step_count, 2);
    assert_abs_diff_eq!(frame.position, Point3::new(1.4, 0.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(frame.distance_to_destination, 8.6, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.arrow.relative_deg, 0.0, epsilon = 1e-9);

    session.exit();
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.tick().is_none());
}

#[test]
fn cross_floor_trip_stops_at_the_connector() {
    let tmp = dataset_dir();
    let source = DirectoryFloorSource::new(tmp.path());
    let mut building = Building::new();
    building.load_floors([FloorId::Level(1), FloorId::Level(2)], &source);

    let selection = resolve_scan(" entrance ", building.locations()).unwrap();
    assert_eq!(selection.floor(), FloorId::Level(1));

    let mut session = NavigationSession::default();
    let preview = session
        .plan(building.locations(), &selection.location.id, "office-201")
        .unwrap();
    assert_eq!(
        preview.description,
        "Entrance → Main Stairs → Floor 2 → Office 201"
    );
    let route = session.route().unwrap();
    assert_eq!(*route.last(), Point3::new(0.0, 0.0, 15.0));
}
