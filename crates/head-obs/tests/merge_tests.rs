//! File-based tests for merging head observations.

use std::path::PathBuf;

use gw_common::ErrorKind;
use head_obs::{merge_head_observations, MergeOptions, WellId};
use tempfile::TempDir;
use test_utils::{observations, temp_test_dir, write_fixture};

fn write_pair(metadata: &str, values: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = temp_test_dir();
    let meta = write_fixture(dir.path(), "obs_meta.txt", metadata);
    let vals = write_fixture(dir.path(), "model_os.txt", values);
    (dir, meta, vals)
}

#[test]
fn test_inner_join_keeps_names_in_both_files() {
    let (_dir, meta, vals) = write_pair(observations::METADATA_ABC, observations::VALUES_BCD);
    let table = merge_head_observations(&meta, &vals, &MergeOptions::default()).unwrap();

    let mut names = table.names();
    names.sort_unstable();
    assert_eq!(names, ["B", "C"]);
}

#[test]
fn test_sorted_by_time_then_numeric_well_id() {
    let (_dir, meta, vals) = write_pair(observations::METADATA_ABC, observations::VALUES_BCD);
    let table = merge_head_observations(&meta, &vals, &MergeOptions::default()).unwrap();

    // Both at time 1; well 210 sorts before 1001
    assert_eq!(table.names(), ["B", "C"]);
    for pair in table.rows().windows(2) {
        assert!(pair[0].time <= pair[1].time);
        if pair[0].time == pair[1].time {
            assert!(pair[0].well_id <= pair[1].well_id);
        }
    }
}

#[test]
fn test_unsorted_keeps_values_order() {
    let (_dir, meta, vals) = write_pair(observations::METADATA_ABC, observations::VALUES_BCD);
    let table =
        merge_head_observations(&meta, &vals, &MergeOptions { sort_output: false }).unwrap();
    assert_eq!(table.names(), ["C", "B"]);
}

#[test]
fn test_merged_fields() {
    let (_dir, meta, vals) = write_pair(observations::METADATA_ABC, observations::VALUES_BCD);
    let table = merge_head_observations(&meta, &vals, &MergeOptions::default()).unwrap();

    let c = table.get("C").unwrap();
    assert_eq!(c.well_id, WellId::new("1001"));
    assert_eq!(c.x, -123456.5);
    assert_eq!(c.y, 45678.25);
    assert_eq!(c.time, 1.0);
    assert_eq!(c.simulated, 99.0);
    assert_eq!(c.observed, 98.75);
    assert_eq!(c.residual(), -0.25);
}

#[test]
fn test_metadata_without_comments() {
    let (_dir, meta, vals) =
        write_pair(observations::METADATA_NO_COMMENTS, observations::VALUES_BCD);
    let err = merge_head_observations(&meta, &vals, &MergeOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatError);
    assert!(err.to_string().contains("obs_meta.txt"));
}

#[test]
fn test_metadata_wrong_field_count() {
    let (_dir, meta, vals) = write_pair(observations::METADATA_SHORT_ROW, observations::VALUES_BCD);
    let err = merge_head_observations(&meta, &vals, &MergeOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatError);
}

#[test]
fn test_values_without_join_key() {
    let (_dir, meta, vals) = write_pair(observations::METADATA_ABC, observations::VALUES_NO_KEY);
    let err = merge_head_observations(&meta, &vals, &MergeOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FormatError);
    assert!(err.to_string().contains("model_os.txt"));
}

#[test]
fn test_missing_file_is_io() {
    let dir = temp_test_dir();
    let vals = write_fixture(dir.path(), "model_os.txt", observations::VALUES_BCD);
    let err = merge_head_observations(dir.path().join("absent.txt"), &vals, &MergeOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_write_csv() {
    let (dir, meta, vals) = write_pair(observations::METADATA_ABC, observations::VALUES_BCD);
    let table = merge_head_observations(&meta, &vals, &MergeOptions::default()).unwrap();

    let out = dir.path().join("merged.csv");
    table.write_csv(&out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "observation_name,well_id,x,y,time,simulated,observed,residual"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("B,210,"));
    assert!(lines[2].starts_with("C,1001,"));
}
