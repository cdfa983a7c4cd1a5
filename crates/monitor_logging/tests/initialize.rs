use log::LevelFilter;
use monitor_logging::{monitor_debug, monitor_info, LogDestination};

#[test]
fn file_destination_writes_records_at_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monitor.log");

    monitor_logging::initialize(LogDestination::File, LevelFilter::Info, &path);
    monitor_info!("cycle {} settled", 3);
    monitor_debug!("below the configured level");
    log::logger().flush();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("cycle 3 settled"));
    assert!(!text.contains("below the configured level"));
}
