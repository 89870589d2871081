//! Per-sub-benchmark samples merged from every `subresults.*` file in a
//! result directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::DataSet;
use crate::error::ResultsError;
use crate::props;

/// A mapping from sub-benchmark name to its accumulated samples.
///
/// Each `subresults.*` file contributes at most one sample per name, so a
/// directory holding one file per iteration yields one [`DataSet`] sample
/// per iteration.
#[derive(Debug, Clone, Default)]
pub struct Subresults {
    data: BTreeMap<String, DataSet>,
}

impl Subresults {
    /// Parse all `subresults.*` files in `directory`.
    ///
    /// When `parse_composite` is set, the overall `score` from the first
    /// `results.*` file is added under `"<benchmarkName> composite"`. The
    /// composite is best-effort: any failure to find or parse it is
    /// swallowed.
    pub fn parse(directory: &Path, parse_composite: bool) -> Result<Subresults, ResultsError> {
        let mut data: BTreeMap<String, DataSet> = BTreeMap::new();

        for file in files_with_prefix(directory, "subresults.")? {
            for (name, value) in props::load(&file)? {
                // Values that fail to parse as reals are known to occur and
                // are skipped.
                if let Ok(sample) = value.parse::<f64>() {
                    data.entry(name).or_default().add(sample);
                }
            }
        }

        if parse_composite {
            if let Some(file) = files_with_prefix(directory, "results.")?.into_iter().next() {
                Self::add_composite(&mut data, &file);
            }
        }

        Ok(Subresults { data })
    }

    fn add_composite(data: &mut BTreeMap<String, DataSet>, file: &Path) {
        let Some(name) = file
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("results."))
        else {
            return;
        };
        let Ok(properties) = props::load(file) else {
            return;
        };
        let Some(score) = properties.get("score").and_then(|v| v.parse::<f64>().ok()) else {
            return;
        };
        let mut set = DataSet::new();
        set.add(score);
        data.insert(format!("{name} composite"), set);
    }

    /// The sub-benchmark names, in sorted order.
    pub fn benchmark_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn get(&self, benchmark_name: &str) -> Option<&DataSet> {
        self.data.get(benchmark_name)
    }

    /// `(name, samples)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataSet)> {
        self.data.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// `(name, mean, stddev)` rows for ad-hoc inspection of a directory.
    pub fn summary(&self) -> Vec<(&str, f64, f64)> {
        self.data
            .iter()
            .map(|(name, set)| (name.as_str(), set.mean(), set.stddev()))
            .collect()
    }
}

/// Files (not directories) in `directory` whose names start with `prefix`,
/// sorted by name so multi-file merges append deterministically.
fn files_with_prefix(directory: &Path, prefix: &str) -> Result<Vec<PathBuf>, ResultsError> {
    let entries = fs::read_dir(directory).map_err(|source| ResultsError::io(directory, source))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ResultsError::io(directory, source))?;
        let is_file = !entry
            .file_type()
            .map_err(|source| ResultsError::io(entry.path(), source))?
            .is_dir();
        if is_file && entry.file_name().to_string_lossy().starts_with(prefix) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
