use std::fs;

use approx::assert_abs_diff_eq;
use sonar_core::decode_log;
use sonar_export::{field_range, map_points, DataExporter, RecordField, CSV_HEADER};
use sonar_types::{FormatVariant, FILE_HEADER_SIZE};
use tempfile::NamedTempFile;

/// Лог формата B: кадры основного канала с нарастающей глубиной.
fn build_track(depths_ft: &[f32]) -> Vec<u8> {
    let l = FormatVariant::B.layout();
    let signal: Vec<u8> = (0..600u32).map(|i| (i % 200) as u8).collect();
    let mut raw = vec![0u8; FILE_HEADER_SIZE];

    for (i, &depth) in depths_ft.iter().enumerate() {
        let size = (l.header_size + signal.len()) as u16;
        let mut hdr = vec![0u8; l.header_size];

        hdr[l.frame_size..l.frame_size + 2].copy_from_slice(&size.to_le_bytes());
        hdr[l.max_range..l.max_range + 4].copy_from_slice(&100.0f32.to_le_bytes());
        hdr[l.water_depth..l.water_depth + 4].copy_from_slice(&depth.to_le_bytes());
        hdr[l.x..l.x + 4].copy_from_slice(&(1_300_000 + i as i32).to_le_bytes());
        hdr[l.y..l.y + 4].copy_from_slice(&(8_000_000 + i as i32).to_le_bytes());
        hdr[l.time_offset..l.time_offset + 4].copy_from_slice(&(i as u32 * 100).to_le_bytes());

        if i == 0 {
            hdr[l.time_base..l.time_base + 4].copy_from_slice(&1_700_000_000u32.to_le_bytes());
        }

        raw.extend_from_slice(&hdr);
        raw.extend_from_slice(&signal);
    }

    raw
}

#[test]
fn test_export_csv_file() {
    let raw = build_track(&[10.0, 20.0, 30.0]);
    let log = decode_log(&raw, FormatVariant::B).unwrap();
    let tmp = NamedTempFile::new().unwrap();

    DataExporter::export_csv(&log.records, tmp.path()).unwrap();

    let text = fs::read_to_string(tmp.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[1].starts_with("2023-11-14T22:13:20.000Z,"));
    assert!(lines[2].starts_with("2023-11-14T22:13:20.100Z,"));

    // 20 фт = 6.096 м
    let cols: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(cols.len(), 9);
    assert_eq!(cols[3], "6.10");
    assert_eq!(cols[5], "30.48");
    // 7 знаков после точки в координатах
    assert_eq!(cols[1].split('.').nth(1).map(str::len), Some(7));
    assert_eq!(cols[2].split('.').nth(1).map(str::len), Some(7));
}

#[test]
fn test_map_layer_over_decoded_track() {
    let raw = build_track(&[10.0, 50.0, 25.0]);
    let records = decode_log(&raw, FormatVariant::B).unwrap().records;

    let range = field_range(&records, RecordField::WaterDepth).unwrap();
    assert_abs_diff_eq!(range.min, 3.048, epsilon = 1e-6);
    assert_abs_diff_eq!(range.max, 15.24, epsilon = 1e-6);

    let points = map_points(&records, RecordField::WaterDepth);
    assert_eq!(points.len(), 3);
    assert_eq!(points[1].value, range.max);
    assert_eq!(range.normalize(points[1].value), 1.0);
    assert_eq!(range.normalize(points[0].value), 0.0);
}

#[test]
fn test_json_report() {
    let raw = build_track(&[10.0, 20.0]);
    let log = decode_log(&raw, FormatVariant::B).unwrap();
    let mut out = Vec::new();

    DataExporter::write_json_report(&log, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value["records"], 2);
    assert_eq!(value["variant"], "B");
    assert_eq!(value["time_base"], 1_700_000_000u64);
    assert_eq!(value["stats"]["frames_scanned"], 2);
    assert_eq!(value["stats"]["scan_end"], "EndOfBuffer");
}
