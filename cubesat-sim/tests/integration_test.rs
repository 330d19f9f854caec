use std::fs;
use std::path::PathBuf;

use cubesat_core::{AgentMode, Placement, Swarm, Vector2D};
use cubesat_shared::{BodyKind, FrameReport};
use cubesat_sim::{load_settings, to_config, JsonLinesSink, MemorySink, Runner};

/// Writes `contents` to a uniquely named file in the system temp dir
fn settings_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "cubesat-sim-{}-{}.json",
        name,
        std::process::id()
    ));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_settings_file_drives_simulation() {
    let path = settings_file(
        "contain",
        r#"{ "width": 600, "height": 600, "boundary": "contain", "fixed_target": true }"#,
    );
    let settings = load_settings(&path).unwrap();
    fs::remove_file(&path).ok();
    let config = to_config(&settings).unwrap();

    let swarm = Swarm::builder(config)
        .seed(21)
        .fixed_target(Vector2D::new(300.0, 300.0))
        .random_agents(5, 2)
        .build()
        .unwrap();
    let mut runner = Runner::new(swarm).report_every(50);
    let mut sink = MemorySink::default();
    let summary = runner.run(Some(500), &mut sink).unwrap();

    assert_eq!(summary.frames, 10);
    assert_eq!(summary.recenter_events, 0);
    for frame in &sink.frames {
        assert_eq!(frame.bodies.len(), 6);
        assert_eq!(frame.bodies[0].kind, BodyKind::Target);
        for body in &frame.bodies {
            assert!((50.0..=550.0).contains(&body.position.x));
            assert!((50.0..=550.0).contains(&body.position.y));
        }
    }
}

#[test]
fn test_malformed_settings_file_is_reported() {
    let path = settings_file("broken", "{ width: nope }");
    let err = load_settings(&path).unwrap_err();
    fs::remove_file(&path).ok();
    assert!(format!("{err:#}").contains("Invalid settings"));
}

#[test]
fn test_missing_settings_file_is_reported() {
    let err = load_settings(&PathBuf::from("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read settings file"));
}

#[test]
fn test_frame_stream_reports_recentering() {
    let swarm = Swarm::builder(Default::default())
        .seed(3)
        .fixed_target(Vector2D::new(760.0, 400.0))
        .agent(Placement::at(Vector2D::new(300.0, 300.0)), AgentMode::Normal)
        .agent(Placement::at(Vector2D::new(300.0, 500.0)), AgentMode::Normal)
        .build()
        .unwrap();
    let mut runner = Runner::new(swarm);
    let mut sink = JsonLinesSink::new(Vec::new());
    let summary = runner.run(Some(5), &mut sink).unwrap();
    assert_eq!(summary.recenter_events, 1);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let frames: Vec<FrameReport> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(frames.len(), 5);
    assert!(frames.iter().all(|frame| frame.recentering));
    assert_eq!(frames[0].status(), Some("Recentering"));
}
