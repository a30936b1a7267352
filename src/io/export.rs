//! CSV and JSON export of zone scores, hourly trends, and impact reports.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::cii::ZoneScore;
use crate::engine::cleaner_hours::hour_label;
use crate::engine::summary::ImpactReport;
use crate::engine::types::{CleanerHour, HourlyRecord};

/// Column header for zone score export.
const ZONE_HEADER: &str = "zip,carbon_intensity,aqi,svi,energy_burden_pct,cii";

/// Column header for hourly trend export.
const HOURLY_HEADER: &str = "hour,label,carbon_intensity,price,load,temp_f,cleaner";

/// Writes zone scores as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_zone_csv(scores: &[ZoneScore], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(ZONE_HEADER.split(','))?;

    for s in scores {
        wtr.write_record(&[
            s.zone.zip.clone(),
            format!("{:.4}", s.zone.carbon_intensity),
            format!("{:.2}", s.zone.aqi),
            format!("{:.4}", s.zone.svi),
            format!("{:.2}", s.zone.energy_burden_pct),
            format!("{:.2}", s.cii),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the hourly trend as CSV, flagging the cleaner hours.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_hourly_csv(
    hours: &[HourlyRecord],
    cleaner: &[CleanerHour],
    writer: impl Write,
) -> io::Result<()> {
    let cleaner: HashSet<u8> = cleaner.iter().map(|c| c.hour).collect();
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HOURLY_HEADER.split(','))?;

    for r in hours {
        wtr.write_record(&[
            r.hour.to_string(),
            hour_label(r.hour),
            format!("{:.4}", r.carbon_intensity),
            format!("{:.3}", r.price),
            format!("{:.1}", r.load),
            r.temp_f.map(|t| format!("{t:.1}")).unwrap_or_default(),
            cleaner.contains(&r.hour).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes an impact report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_report_json(report: &ImpactReport, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)
}

/// Exports zone scores to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_zone_csv(scores: &[ZoneScore], path: &Path) -> io::Result<()> {
    write_zone_csv(scores, io::BufWriter::new(File::create(path)?))
}

/// Exports the hourly trend to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_hourly_csv(
    hours: &[HourlyRecord],
    cleaner: &[CleanerHour],
    path: &Path,
) -> io::Result<()> {
    write_hourly_csv(hours, cleaner, io::BufWriter::new(File::create(path)?))
}

/// Exports an impact report to a JSON file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_report_json(report: &ImpactReport, path: &Path) -> io::Result<()> {
    let mut buf = io::BufWriter::new(File::create(path)?);
    write_report_json(report, &mut buf)?;
    buf.flush()
}
