//! Raw-sample export as delimited text.
//!
//! The export is deliberately statistics-free: it writes the raw, unfiltered
//! timings (and baselines) so the table can be re-analyzed with independent
//! tooling. One column per series, one sample index per row.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::run::{Baselines, ComparisonRun};

/// Writes a comparison run's raw samples as a comma-delimited table.
///
/// Column layout follows the baseline mode: no baseline adds no columns, a
/// shared baseline appends one trailing `baseline` column, and per-candidate
/// baselines interleave a "`{name} bl`" column after each candidate.
pub struct CsvExporter;

impl CsvExporter {
    /// Write the table to `path` and return the path on success.
    ///
    /// Values are formatted with their shortest round-trip representation;
    /// cells are blank where a series is shorter than the longest one. I/O
    /// errors propagate unchanged and the file handle is released on every
    /// exit path.
    pub fn write<E, P: AsRef<Path>>(run: &ComparisonRun<E>, path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        let (header, columns) = Self::table(run);
        let rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);

        let file = File::create(path)?;
        let mut out = BufWriter::new(file);

        let header_line: Vec<String> = header.iter().map(|h| escape(h)).collect();
        writeln!(out, "{}", header_line.join(","))?;

        for row in 0..rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|col| col.get(row).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            writeln!(out, "{}", cells.join(","))?;
        }
        out.flush()?;

        info!(
            path = %path.display(),
            rows,
            columns = columns.len(),
            "Exported raw samples"
        );
        Ok(path.to_path_buf())
    }

    /// Column headers and column data in output order.
    fn table<E>(run: &ComparisonRun<E>) -> (Vec<String>, Vec<&[f64]>) {
        let names: Vec<&str> = run.group().names().collect();
        let timings = run.timings();

        match run.baselines() {
            Baselines::None => (
                names.iter().map(|n| n.to_string()).collect(),
                timings.iter().map(Vec::as_slice).collect(),
            ),
            Baselines::Shared(base) => {
                let mut header: Vec<String> = names.iter().map(|n| n.to_string()).collect();
                header.push("baseline".to_string());
                let mut columns: Vec<&[f64]> = timings.iter().map(Vec::as_slice).collect();
                columns.push(base.as_slice());
                (header, columns)
            }
            Baselines::PerCandidate(bases) => {
                let mut header = Vec::with_capacity(names.len() * 2);
                let mut columns = Vec::with_capacity(names.len() * 2);
                for (i, name) in names.iter().enumerate() {
                    header.push(name.to_string());
                    header.push(format!("{} bl", name));
                    columns.push(timings[i].as_slice());
                    columns.push(bases[i].as_slice());
                }
                (header, columns)
            }
        }
    }
}

/// Quote a header field when it contains a delimiter or a quote.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupOptions;
    use crate::group::Group;

    fn run_with(
        names: &[&str],
        timings: Vec<Vec<f64>>,
        baselines: Baselines,
    ) -> ComparisonRun<()> {
        let group = Group::new(
            names.iter().map(|n| (n.to_string(), ())).collect(),
            GroupOptions::default(),
        )
        .unwrap();
        ComparisonRun::new(group, timings, baselines).unwrap()
    }

    #[test]
    fn test_header_without_baseline() {
        let run = run_with(
            &["a", "b"],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            Baselines::None,
        );
        let (header, columns) = CsvExporter::table(&run);
        assert_eq!(header, vec!["a", "b"]);
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn test_header_with_shared_baseline() {
        let run = run_with(
            &["a", "b"],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            Baselines::Shared(vec![0.5, 0.5]),
        );
        let (header, columns) = CsvExporter::table(&run);
        assert_eq!(header, vec!["a", "b", "baseline"]);
        assert_eq!(columns[2], &[0.5, 0.5]);
    }

    #[test]
    fn test_header_interleaves_split_baselines() {
        let run = run_with(
            &["a", "b"],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            Baselines::PerCandidate(vec![vec![0.1, 0.1], vec![0.2, 0.2]]),
        );
        let (header, columns) = CsvExporter::table(&run);
        assert_eq!(header, vec!["a", "a bl", "b", "b bl"]);
        assert_eq!(columns[1], &[0.1, 0.1]);
        assert_eq!(columns[3], &[0.2, 0.2]);
    }

    #[test]
    fn test_escape_quotes_delimiters() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
