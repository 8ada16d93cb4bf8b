#![cfg(test)]
//! The desktop launcher ships the drift payload inside the binary; packaged builds have no
//! loose `mock_data.json` to read, so the compiled-in copy has to parse on its own.

use ui::core::config::DashboardConfig;
use ui::core::loader::parse_snapshot;

#[test]
fn embedded_payload_parses_and_is_square() {
    let snapshot = parse_snapshot(ui::EMBEDDED_SNAPSHOT).expect("embedded payload parses");
    assert!(snapshot.turn_count() > 0);
    assert!(snapshot.check_shape().is_ok());
}

#[test]
fn desktop_config_reads_nothing_from_disk() {
    let config = DashboardConfig::embedded("mock_data.json", ui::EMBEDDED_SNAPSHOT);
    assert_eq!(config.embedded, Some(ui::EMBEDDED_SNAPSHOT));
    assert!(!std::path::Path::new(&config.data_source).is_absolute());
}

#[test]
fn embedded_copy_matches_the_web_asset_source() {
    let on_disk = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../ui/assets/data/mock_data.json"
    ));
    assert_eq!(ui::EMBEDDED_SNAPSHOT, on_disk);
}
