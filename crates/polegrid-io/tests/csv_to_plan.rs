//! CSV import through planning and JSON output

use polegrid_algo::Planner;
use polegrid_core::{NetworkPlan, NodeRole, PlanRequest};
use polegrid_io::{parse_costs, read_points_csv, read_request, write_json};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn village_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Name,Latitude,Longitude").unwrap();
    writeln!(file, "Center House,0.0,0.0").unwrap();
    writeln!(file, "North House,0.0005,0.0").unwrap();
    writeln!(file, "East House,0.0,0.0005").unwrap();
    writeln!(file, "Substation,-0.0005,0.0").unwrap();
    writeln!(file, "Unsurveyed,,").unwrap();
    writeln!(file, ",0.0,-0.0005").unwrap();
    file
}

#[test]
fn csv_points_plan_and_round_trip_through_json() {
    let csv = village_csv();
    let import = read_points_csv(csv.path()).unwrap();
    assert_eq!(import.points.len(), 5);
    assert_eq!(import.diagnostics.warning_count(), 1);

    let costs = parse_costs(r#"{"poleCost": 100, "lowVoltageCostPerMeter": 1}"#).unwrap();
    let request = PlanRequest::new(import.points, costs);
    let plan = Planner::new().plan(&request).unwrap();
    assert_eq!(plan.debug.source_name, "Substation");
    assert_eq!(plan.nodes_with_role(NodeRole::Destination).count(), 4);

    let dir = tempdir().unwrap();
    let out = dir.path().join("plan.json");
    write_json(&plan, Some(&out)).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let reread: NetworkPlan = serde_json::from_str(&text).unwrap();
    assert_eq!(reread, plan);
    assert_eq!(reread.used_costs.pole_cost, 100.0);
}

#[test]
fn request_file_with_bad_coordinate_fails_at_planning() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("request.json");
    std::fs::write(
        &path,
        r#"{"points": [{"lat": 0, "lng": 0}, {"lat": 0, "lng": 181}]}"#,
    )
    .unwrap();

    // Shape is fine; range is checked by the planner
    let request = read_request(&path).unwrap();
    let err = Planner::new().plan(&request).unwrap_err();
    assert!(err.to_string().contains("longitude 181"));
}
