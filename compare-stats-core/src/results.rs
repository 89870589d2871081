//! One benchmark's record, parsed from the `results.<name>` property file
//! inside a result directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::DataSet;
use crate::error::ResultsError;
use crate::props;
use crate::stats;

/// Direction-of-goodness declared for a sub-benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Higher,
    Lower,
}

/// Workload- or plain-specific attributes of a [`Results`] record.
///
/// Workloads aggregate child benchmarks and carry weights; plain records
/// carry their own summary statistics and declare the direction of each
/// sub-benchmark measured alongside them.
#[derive(Debug, Clone)]
pub enum Kind {
    Workload {
        weights: DataSet,
        failed: bool,
    },
    Plain {
        mean: f64,
        stddev: f64,
        var: f64,
        attempts: u32,
        successes: u32,
        failures: u32,
        subresults: BTreeMap<String, Direction>,
    },
}

/// One benchmark's identity, scores and metadata.
#[derive(Debug, Clone)]
pub struct Results {
    name: String,
    directory: PathBuf,
    is_higher_better: bool,
    score: f64,
    scores: DataSet,
    kind: Kind,
}

impl Results {
    /// Parse the single `results.*` file in `directory`, deducing the
    /// benchmark name from the file name.
    pub fn parse(directory: &Path) -> Result<Results, ResultsError> {
        let file = find_results_file(directory)?;
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("results."))
            .unwrap_or_default()
            .to_string();
        let properties = props::load(&file)?;

        let is_workload = get_bool(&properties, &file, "is_workload")?;
        let is_higher_better = get_bool(&properties, &file, "is_higher_better")?;
        let score = get_f64(&properties, &file, "score")?;
        let scores = get_data_set(&properties, &file, "scores")?;

        let kind = if is_workload {
            Kind::Workload {
                weights: get_data_set(&properties, &file, "weights")?,
                failed: get_bool(&properties, &file, "failed")?,
            }
        } else {
            let mut subresults = BTreeMap::new();
            // Lower first so a label listed in both sets reads as Higher,
            // matching the precedence of the direction queries.
            for label in get_labels(&properties, &file, "subresults_lower")? {
                subresults.insert(label, Direction::Lower);
            }
            for label in get_labels(&properties, &file, "subresults_higher")? {
                subresults.insert(label, Direction::Higher);
            }
            Kind::Plain {
                mean: get_f64(&properties, &file, "mean")?,
                stddev: get_f64(&properties, &file, "stdev")?,
                var: get_f64(&properties, &file, "var")?,
                attempts: get_u32(&properties, &file, "attempts")?,
                successes: get_u32(&properties, &file, "successes")?,
                failures: get_u32(&properties, &file, "failures")?,
                subresults,
            }
        };

        Ok(Results {
            name,
            directory: directory.to_path_buf(),
            is_higher_better,
            score,
            scores,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The result directory this record was parsed from, retained for
    /// recursive descent and sub-benchmark lookup.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn is_workload(&self) -> bool {
        matches!(self.kind, Kind::Workload { .. })
    }

    pub fn is_higher_better(&self) -> bool {
        self.is_higher_better
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn scores(&self) -> &DataSet {
        &self.scores
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The record's summary score: the parsed `mean` for plain records, and
    /// the overall `score` for workloads (which carry no `mean` key but are
    /// reported through the weighted-geomean line).
    pub fn mean(&self) -> f64 {
        match &self.kind {
            Kind::Workload { .. } => self.score,
            Kind::Plain { mean, .. } => *mean,
        }
    }

    /// Whether the named sub-benchmark is higher-is-better.
    pub fn is_subresult_higher(&self, subresult: &str) -> Result<bool, ResultsError> {
        Ok(self.subresult_direction(subresult)? == Direction::Higher)
    }

    /// Whether the named sub-benchmark is lower-is-better.
    pub fn is_subresult_lower(&self, subresult: &str) -> Result<bool, ResultsError> {
        Ok(self.subresult_direction(subresult)? == Direction::Lower)
    }

    fn subresult_direction(&self, subresult: &str) -> Result<Direction, ResultsError> {
        match &self.kind {
            Kind::Plain { subresults, .. } => subresults
                .get(subresult)
                .copied()
                .ok_or_else(|| ResultsError::UnknownSubresult(subresult.to_string())),
            Kind::Workload { .. } => Err(ResultsError::UnknownSubresult(subresult.to_string())),
        }
    }

    /// Any declared sub-benchmark label, or `None` when there are none.
    /// Used only as an existence probe when deciding whether to recurse
    /// into nested result directories.
    pub fn random_subresult_name(&self) -> Option<&str> {
        match &self.kind {
            Kind::Plain { subresults, .. } => subresults.keys().next().map(String::as_str),
            Kind::Workload { .. } => None,
        }
    }

    /// Percent difference between two records' means, using the specimen's
    /// direction-of-goodness. Fails when the two records disagree on
    /// direction.
    pub fn percent_diff(baseline: &Results, specimen: &Results) -> Result<f64, ResultsError> {
        if baseline.is_higher_better() != specimen.is_higher_better() {
            return Err(ResultsError::IncomparableResults);
        }
        Ok(stats::percent_diff(
            baseline.mean(),
            specimen.mean(),
            specimen.is_higher_better(),
        ))
    }
}

/// Locate the single `results.*` file (not directory) in `directory`.
fn find_results_file(directory: &Path) -> Result<PathBuf, ResultsError> {
    let entries = fs::read_dir(directory).map_err(|source| ResultsError::io(directory, source))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ResultsError::io(directory, source))?;
        let is_file = !entry
            .file_type()
            .map_err(|source| ResultsError::io(entry.path(), source))?
            .is_dir();
        if is_file && entry.file_name().to_string_lossy().starts_with("results.") {
            files.push(entry.path());
        }
    }
    match files.len() {
        0 => Err(ResultsError::NoResultsFile(directory.to_path_buf())),
        1 => Ok(files.remove(0)),
        count => Err(ResultsError::MultipleResultsFiles {
            directory: directory.to_path_buf(),
            count,
        }),
    }
}

fn get_value<'a>(
    properties: &'a BTreeMap<String, String>,
    file: &Path,
    key: &str,
) -> Result<&'a str, ResultsError> {
    properties
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| ResultsError::parse(file, format!("missing key `{key}`")))
}

fn get_f64(
    properties: &BTreeMap<String, String>,
    file: &Path,
    key: &str,
) -> Result<f64, ResultsError> {
    let value = get_value(properties, file, key)?;
    value
        .parse()
        .map_err(|_| ResultsError::parse(file, format!("invalid value `{value}` for `{key}`")))
}

fn get_u32(
    properties: &BTreeMap<String, String>,
    file: &Path,
    key: &str,
) -> Result<u32, ResultsError> {
    let value = get_value(properties, file, key)?;
    value
        .parse()
        .map_err(|_| ResultsError::parse(file, format!("invalid value `{value}` for `{key}`")))
}

/// The harness encodes booleans as 0/1 integers.
fn get_bool(
    properties: &BTreeMap<String, String>,
    file: &Path,
    key: &str,
) -> Result<bool, ResultsError> {
    let value = get_value(properties, file, key)?;
    let number: i32 = value
        .parse()
        .map_err(|_| ResultsError::parse(file, format!("invalid value `{value}` for `{key}`")))?;
    Ok(number == 1)
}

fn get_data_set(
    properties: &BTreeMap<String, String>,
    file: &Path,
    key: &str,
) -> Result<DataSet, ResultsError> {
    let value = get_value(properties, file, key)?;
    value
        .split_whitespace()
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| ResultsError::parse(file, format!("invalid value `{s}` in `{key}`")))
        })
        .collect()
}

/// Space-separated label list; the empty string from an empty value is
/// discarded.
fn get_labels(
    properties: &BTreeMap<String, String>,
    file: &Path,
    key: &str,
) -> Result<Vec<String>, ResultsError> {
    let value = get_value(properties, file, key)?;
    Ok(value
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}
