//! Console and file output for segment tables
//!
//! The map file is a two-column text table:
//!
//! ```text
//! Center Angle (deg), Average Distance (m)
//! 2.00, 1.25
//! 6.00, 1.31
//! ```
//!
//! Values are written with two decimals, so a save/load round trip is exact
//! to two decimal places only.

use crate::constants::{MAP_COLUMN_SEPARATOR, MAP_HEADER, TABLE_COLUMN_GAP, TABLE_HEADER};
use crate::error::{LidarError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use lidarseg_data::{AngularSegment, LaserScan};
use log::info;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn format_segment_table(segments: &[AngularSegment]) -> String {
    let mut table = String::new();
    let _ = writeln!(table, "{TABLE_HEADER}");
    for segment in segments {
        let _ = writeln!(
            table,
            "{:.2}{}{:.2}",
            segment.center_angle_deg, TABLE_COLUMN_GAP, segment.mean_distance_m
        );
    }
    table
}

pub fn print_segments(title: &str, segments: &[AngularSegment]) {
    println!("{title}");
    print!("{}", format_segment_table(segments));
}

pub fn format_laser_scan(scan: &LaserScan) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "LaserScan Data:");
    let _ = writeln!(text, "Angle Min: {:?} degrees", scan.angle_min_deg);
    let _ = writeln!(text, "Angle Max: {:?} degrees", scan.angle_max_deg);
    let _ = writeln!(text, "Angle Increment: {:?} degrees", scan.angle_increment_deg);
    let _ = writeln!(text, "Ranges:");
    for (angle, distance) in scan.points() {
        let _ = writeln!(text, "Angle: {angle:.2} degrees, Distance: {distance:.2} m");
    }
    text
}

pub fn save_map<P: AsRef<Path>>(segments: &[AngularSegment], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{MAP_HEADER}")?;
    for segment in segments {
        writeln!(
            writer,
            "{:.2}{}{:.2}",
            segment.center_angle_deg, MAP_COLUMN_SEPARATOR, segment.mean_distance_m
        )?;
    }
    writer.flush()?;
    info!("Map saved to {}", path.display());
    Ok(())
}

/// Reads a file written by [`save_map`]. The first line is taken as the header.
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<Vec<AngularSegment>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LidarError::MapNotFound(path.to_path_buf()));
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let mut segments = Vec::new();
    for result in reader.records() {
        let record = result?;
        let segment = parse_map_record(&record).ok_or_else(|| LidarError::MalformedMapRow {
            line: record.position().map_or(0, |p| p.line() as usize),
            content: record.iter().collect::<Vec<_>>().join(","),
        })?;
        segments.push(segment);
    }
    Ok(segments)
}

fn parse_map_record(record: &StringRecord) -> Option<AngularSegment> {
    if record.len() != 2 {
        return None;
    }
    let angle: f64 = record.get(0)?.parse().ok()?;
    let distance: f64 = record.get(1)?.parse().ok()?;
    Some(AngularSegment::new(angle, distance))
}
