// tests/integration_stats.rs
//! End-to-end aggregation runs over fixture trees on disk.

use std::fs;
use std::path::Path;

use compatgen_core::config::{CategoryConfig, Config};
use compatgen_core::stats;
use compatgen_core::support::VersionValue;

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn elements_config(root: &Path) -> Config {
    Config {
        root: root.to_path_buf(),
        platforms: vec!["android".into(), "ios".into()],
        categories: vec![CategoryConfig {
            path: "elements".into(),
            display_name: "Elements".into(),
            doc_prefix: "/api/elements/built-in".into(),
            nested_docs: false,
        }],
        recent_versions: vec!["3.4".into(), "3.5".into()],
        ..Config::default()
    }
}

const VIEW_JSON: &str = r#"{
  "view": {
    "__compat": {
      "support": {
        "android": { "version_added": "1.0" },
        "ios": { "version_added": false }
      },
      "description": "<code>view</code>"
    }
  }
}"#;

#[test]
fn test_single_file_category() {
    let d = tempfile::tempdir().unwrap();
    write_file(d.path(), "elements/view.json", VIEW_JSON);

    let report = stats::generate(&elements_config(d.path())).unwrap();

    assert_eq!(report.summary.total_apis, 1);
    let detail = &report.categories["elements"];
    assert_eq!(detail.stats.total, 1);
    assert_eq!(detail.stats.supported["android"], 1);
    assert_eq!(detail.stats.supported["ios"], 0);
    assert_eq!(detail.stats.coverage["android"], 100);
    assert_eq!(detail.stats.coverage["ios"], 0);

    assert_eq!(report.features.len(), 1);
    let feature = &report.features[0];
    assert_eq!(feature.id, "feature-0");
    assert_eq!(feature.query, "elements/view");
    assert_eq!(feature.name, "view");
    assert_eq!(feature.category, "elements");
    assert_eq!(feature.source_file, "elements/view.json");
    assert_eq!(
        feature.support["android"].version_added,
        Some(VersionValue::Version("1.0".into()))
    );
    assert_eq!(
        feature.support["ios"].version_added,
        Some(VersionValue::Flag(false))
    );
}

#[test]
fn test_two_files_half_coverage() {
    let d = tempfile::tempdir().unwrap();
    write_file(
        d.path(),
        "elements/view.json",
        r#"{"view": {"__compat": {"support": {"android": {"version_added": "1.0"}}}}}"#,
    );
    write_file(
        d.path(),
        "elements/text.json",
        r#"{"text": {"__compat": {"support": {"android": {"version_added": false}}}}}"#,
    );

    let report = stats::generate(&elements_config(d.path())).unwrap();

    let detail = &report.categories["elements"];
    assert_eq!(detail.stats.total, 2);
    assert_eq!(detail.stats.supported["android"], 1);
    assert_eq!(detail.stats.coverage["android"], 50);
}

#[test]
fn test_missing_and_supported_partition_records() {
    let d = tempfile::tempdir().unwrap();
    write_file(
        d.path(),
        "elements/view.json",
        r#"{"view": {
            "__compat": {"support": {"android": {"version_added": "1.0"}}},
            "name": {"__compat": {"support": {"ios": {"version_added": true}}}}
        }}"#,
    );

    let report = stats::generate(&elements_config(d.path())).unwrap();
    let detail = &report.categories["elements"];

    for platform in ["android", "ios"] {
        let missing: Vec<&str> = detail.missing[platform]
            .iter()
            .map(|r| r.path.as_str())
            .collect();
        let supported: Vec<&str> = detail
            .api_details
            .iter()
            .filter(|r| {
                matches!(
                    r.support.get(platform),
                    Some(VersionValue::Version(_)) | Some(VersionValue::Flag(true))
                )
            })
            .map(|r| r.path.as_str())
            .collect();

        assert_eq!(missing.len() + supported.len(), detail.stats.total);
        for path in &missing {
            assert!(!supported.contains(path));
        }
    }
}

#[test]
fn test_recent_apis_sorted_by_name() {
    let d = tempfile::tempdir().unwrap();
    write_file(
        d.path(),
        "elements/beta.json",
        r#"{"beta": {"__compat": {"support": {"android": {"version_added": "3.4"}}, "description": "beta"}}}"#,
    );
    write_file(
        d.path(),
        "elements/alpha.json",
        r#"{"alpha": {"__compat": {"support": {"android": {"version_added": "3.5.1"}}, "description": "Alpha"}}}"#,
    );
    write_file(
        d.path(),
        "elements/old.json",
        r#"{"old": {"__compat": {"support": {"android": {"version_added": "3.3"}}, "description": "old"}}}"#,
    );

    let report = stats::generate(&elements_config(d.path())).unwrap();

    let names: Vec<&str> = report.recent_apis.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "beta"]);
    assert_eq!(
        report.recent_apis[0].versions["android"],
        VersionValue::Version("3.5.1".into())
    );
}

#[test]
fn test_timeline_from_version_history() {
    let d = tempfile::tempdir().unwrap();
    write_file(
        d.path(),
        "elements/view.json",
        r#"{"view": {"__compat": {"support": {"android": {"version_added": "1.5"}}}}}"#,
    );
    write_file(
        d.path(),
        "version.json",
        r#"{"history": [{"version": "1.0"}, {"version": "2.0", "release_date": "2024-01-01"}]}"#,
    );

    let report = stats::generate(&elements_config(d.path())).unwrap();

    assert_eq!(report.timeline.len(), 2);
    assert_eq!(report.timeline[0].version, "1.0");
    assert_eq!(report.timeline[0].platforms["android"].supported, 0);
    assert_eq!(report.timeline[1].version, "2.0");
    assert_eq!(report.timeline[1].platforms["android"].supported, 1);
    assert_eq!(report.timeline[1].platforms["android"].coverage, 100);
    assert_eq!(
        report.timeline[1].release_date.as_deref(),
        Some("2024-01-01")
    );
}

#[test]
fn test_missing_version_history_skips_timeline() {
    let d = tempfile::tempdir().unwrap();
    write_file(d.path(), "elements/view.json", VIEW_JSON);

    let report = stats::generate(&elements_config(d.path())).unwrap();
    assert!(report.timeline.is_empty());
}

#[test]
fn test_missing_category_dir_yields_empty_stats() {
    let d = tempfile::tempdir().unwrap();

    let report = stats::generate(&elements_config(d.path())).unwrap();

    assert_eq!(report.summary.total_apis, 0);
    let detail = &report.categories["elements"];
    assert_eq!(detail.stats.total, 0);
    assert!(detail.api_details.is_empty());
    assert!(report.features.is_empty());
    assert_eq!(report.summary.by_platform["android"].coverage_percent, 0);
}

#[test]
fn test_unparseable_document_is_fatal_and_names_the_file() {
    let d = tempfile::tempdir().unwrap();
    write_file(d.path(), "elements/broken.json", "{ not json");

    let err = stats::generate(&elements_config(d.path())).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_repeated_runs_are_identical_except_timestamp() {
    let d = tempfile::tempdir().unwrap();
    write_file(d.path(), "elements/view.json", VIEW_JSON);
    write_file(
        d.path(),
        "elements/nested/text.json",
        r#"{"text": {"__compat": {"support": {"ios": {"version_added": "2.0"}}}}}"#,
    );
    write_file(
        d.path(),
        "version.json",
        r#"{"history": [{"version": "1.0"}, {"version": "2.0"}]}"#,
    );

    let config = elements_config(d.path());
    let mut first = serde_json::to_value(stats::generate(&config).unwrap()).unwrap();
    let mut second = serde_json::to_value(stats::generate(&config).unwrap()).unwrap();

    first["generated_at"] = serde_json::Value::Null;
    second["generated_at"] = serde_json::Value::Null;
    assert_eq!(first, second);
}

#[test]
fn test_written_artifact_is_valid_json() {
    let d = tempfile::tempdir().unwrap();
    write_file(d.path(), "elements/view.json", VIEW_JSON);

    let config = elements_config(d.path());
    let report = stats::generate(&config).unwrap();
    let out = d.path().join("api-stats.json");
    stats::write_stats(&report, &out).unwrap();

    let raw = fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["summary"]["total_apis"], 1);
    assert_eq!(parsed["features"][0]["query"], "elements/view");
    // Unsupported platforms serialize as the explicit `false` flag, unknown as null.
    assert_eq!(
        parsed["features"][0]["support"]["ios"]["version_added"],
        serde_json::Value::Bool(false)
    );
}
