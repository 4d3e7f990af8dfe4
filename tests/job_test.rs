use framekit::{
    Config, FileProgramSource, FrameJob, FrameSettings, InMemoryProgram, Point2D, RecordingSink,
    StaticMachineState, UnitMode, WriterSink,
};
use tempfile::TempDir;

const PROGRAM: &str = "\
; two holes joined by an arc
G20 G90
G0 X1 Y1
G1 Z-0.1 F20
G2 X3 Y1 I1 J0
G0 Z0.5
M30
";

#[test]
fn test_frame_program_file_to_writer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("part.nc");
    std::fs::write(&path, PROGRAM).unwrap();

    let source = FileProgramSource::new(&path);
    let machine = StaticMachineState::new(Point2D::new(2.0, 0.5), "40");
    let mut sink = WriterSink::new(Vec::new());

    let report = FrameJob::default().run(&source, &machine, &mut sink).unwrap();
    assert_eq!(report.frame.unit_mode, Some(UnitMode::Inch));
    // Clockwise from west to east over the top: peaks at y = 2
    assert_eq!(report.frame.bounds.max, Point2D::new(3.0, 2.0));

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let expected = "\
G20
G90
G0 X0.000 Y0.000
G1 F40.0 X3.000 Y0.000
G1 F40.0 X3.000 Y2.000
G1 F40.0 X0.000 Y2.000
G1 F40.0 X0.000 Y0.000
G0 X2.000 Y0.500
#1000=40 M221
M30
";
    assert_eq!(text, expected);
}

#[test]
fn test_missing_program_file() {
    let dir = TempDir::new().unwrap();
    let source = FileProgramSource::new(dir.path().join("absent.nc"));
    let machine = StaticMachineState::new(Point2D::ORIGIN, "");
    let mut sink = RecordingSink::default();

    let err = FrameJob::default()
        .run(&source, &machine, &mut sink)
        .unwrap_err();
    assert!(err.is_program_not_found());
    assert!(sink.batches.is_empty());
}

#[test]
fn test_settings_loaded_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[frame]\ndefault_feed_rate = 500.0\nfeed_units = \"mm_per_min\"\nend_program = false\n",
    )
    .unwrap();

    let config = Config::load_from_file(&config_path).unwrap();
    let job = FrameJob::new(config.frame);
    let source = InMemoryProgram::new("G21\nG1 X10 Y10");
    let machine = StaticMachineState::new(Point2D::ORIGIN, "");
    let mut sink = RecordingSink::default();

    let report = job.run(&source, &machine, &mut sink).unwrap();
    assert_eq!(report.feed_rate, 500.0);
    assert_eq!(
        report.commands.last().map(String::as_str),
        Some("G0 X0.000 Y0.000")
    );
}

#[test]
fn test_empty_program_frames_a_point() {
    let source = InMemoryProgram::new("");
    let machine = StaticMachineState::new(Point2D::ORIGIN, "");
    let mut sink = RecordingSink::default();

    let report = framekit::run(&source, &machine, &mut sink, &FrameSettings::default()).unwrap();
    assert!(report.frame.is_degenerate());
    assert_eq!(report.commands[0], "G90");
    assert!(report.commands[1..5]
        .iter()
        .all(|c| c.ends_with("X0.000 Y0.000")));
}
