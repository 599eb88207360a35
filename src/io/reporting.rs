// src/io/reporting.rs

use std::io::Write;
use std::path::Path;

use crate::error::SupplyChainError;
use crate::metrics::MetricRecord;

/// Writes the metric stream to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `records` - The metric stream produced by [`crate::simulation::Simulator::run`].
pub fn write_metrics_csv(file_path: impl AsRef<Path>, records: &[MetricRecord]) -> Result<(), SupplyChainError> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;

    println!(
        "Successfully exported {} rows to '{}'",
        records.len(),
        path.display()
    );
    Ok(())
}

/// Writes the metric stream as line-delimited JSON, one record per line.
/// A lighter-weight sink than CSV for downstream tools that already speak
/// JSON (dashboards, log shippers).
pub fn write_metrics_jsonl(file_path: impl AsRef<Path>, records: &[MetricRecord]) -> Result<(), SupplyChainError> {
    let path = file_path.as_ref();
    let mut file = std::fs::File::create(path)?;

    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricEvent;
    use crate::model::Sku;

    fn sample_records() -> Vec<MetricRecord> {
        let a: Sku = "A".into();
        vec![
            MetricRecord::new(1, &a, MetricEvent::Order, 10),
            MetricRecord::new(2, &a, MetricEvent::Receipt, 10).with_sku(&a),
        ]
    }

    #[test]
    fn csv_round_trips_through_a_temp_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("chain-stock-sim-test-metrics.csv");
        write_metrics_csv(&path, &sample_records()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("order"));
        assert!(contents.contains("receipt"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn jsonl_writes_one_record_per_line() {
        let dir = std::env::temp_dir();
        let path = dir.join("chain-stock-sim-test-metrics.jsonl");
        write_metrics_jsonl(&path, &sample_records()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        let _ = std::fs::remove_file(&path);
    }
}
