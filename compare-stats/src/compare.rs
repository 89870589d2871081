//! The comparator: loads runs, pairs baseline with specimens and writes the
//! report.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use compare_stats_core::{
    percent_diff, welch_t_test, Kind, Results, ResultsError, StatsError, Subresults,
};

use crate::report;

/// Errors raised while comparing runs.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A run directory could not be listed.
    #[error("Directory not found: {}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Results(#[from] ResultsError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    /// The specimen run does not mirror the baseline's shape.
    #[error(
        "Run {} has {specimen_count} result directories, baseline {} has {baseline_count}",
        .specimen.display(),
        .baseline.display()
    )]
    ShapeMismatch {
        baseline: PathBuf,
        baseline_count: usize,
        specimen: PathBuf,
        specimen_count: usize,
    },

    /// A baseline sub-benchmark has no samples on the specimen side.
    #[error("No specimen samples for sub-benchmark {name} in {}", .directory.display())]
    MissingSubresult { name: String, directory: PathBuf },

    /// Writing the report failed.
    #[error("Failed to write report: {0}")]
    Write(#[from] io::Error),
}

/// One parsed run: the user-supplied directory and its result records in
/// lexicographic directory order.
#[derive(Debug)]
struct Run {
    directory: PathBuf,
    results: Vec<Results>,
}

/// Compares an ordered list of runs, the first being the baseline.
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    recursive: bool,
}

impl Comparator {
    pub fn new(recursive: bool) -> Self {
        Comparator { recursive }
    }

    /// Read every run directory and write the full comparison report.
    pub fn compare(&self, dirs: &[PathBuf], out: &mut impl Write) -> Result<(), CompareError> {
        let runs: Vec<Run> = dirs
            .iter()
            .map(|dir| {
                Ok(Run {
                    directory: dir.clone(),
                    results: read_run(dir)?,
                })
            })
            .collect::<Result<_, CompareError>>()?;

        // The first workload record found across all runs, in order, supplies
        // the workload name, the geomean baseline and the direction used for
        // benchmark rows.
        let workload = runs
            .iter()
            .flat_map(|run| run.results.iter())
            .find(|res| res.is_workload());

        report::separator(out)?;
        self.write_baseline_block(&runs[0], workload, out)?;
        for specimen in &runs[1..] {
            self.write_specimen_block(&runs[0], specimen, workload, out)?;
        }
        report::separator(out)?;
        Ok(())
    }

    fn write_baseline_block(
        &self,
        baseline: &Run,
        workload: Option<&Results>,
        out: &mut impl Write,
    ) -> Result<(), CompareError> {
        report::block_heading(out, &baseline.directory, workload)?;
        report::baseline_heading(out)?;
        self.write_baseline_rows(&baseline.results, workload.is_some(), out)?;
        if let Some(workload) = workload {
            report::rule(out)?;
            report::baseline_geomean(out, workload.mean())?;
        }
        Ok(())
    }

    fn write_baseline_rows(
        &self,
        results: &[Results],
        have_workload: bool,
        out: &mut impl Write,
    ) -> Result<(), CompareError> {
        for res in results {
            if let Kind::Plain {
                mean,
                stddev,
                successes,
                ..
            } = res.kind()
            {
                report::baseline_row(out, res.name(), *successes as usize, *mean, *stddev)?;
            }
            if self.recursive {
                let subresults = Subresults::parse(res.directory(), false)?;
                for (name, data) in subresults.iter() {
                    report::baseline_subrow(
                        out,
                        name,
                        data.num_samples(),
                        data.mean(),
                        data.stddev(),
                    )?;
                }
            }
        }

        if !have_workload && self.recursive && should_descend(results) {
            for res in results {
                let children = read_run(res.directory())?;
                self.write_baseline_rows(&children, have_workload, out)?;
            }
        }
        Ok(())
    }

    fn write_specimen_block(
        &self,
        baseline: &Run,
        specimen: &Run,
        workload: Option<&Results>,
        out: &mut impl Write,
    ) -> Result<(), CompareError> {
        report::separator(out)?;
        report::block_heading(out, &specimen.directory, workload)?;
        report::specimen_heading(out)?;
        self.write_specimen_rows(&baseline.results, &specimen.results, workload, out)?;
        if let Some(workload) = workload {
            report::rule(out)?;
            for res in &specimen.results {
                if res.is_workload() {
                    report::specimen_geomean(
                        out,
                        res.mean(),
                        percent_diff(workload.mean(), res.mean(), workload.is_higher_better()),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn write_specimen_rows(
        &self,
        baseline: &[Results],
        specimen: &[Results],
        workload: Option<&Results>,
        out: &mut impl Write,
    ) -> Result<(), CompareError> {
        // Pairing is strictly by index; the baseline's shape is authoritative.
        if baseline.len() != specimen.len() {
            return Err(shape_mismatch(baseline, specimen));
        }

        for (res1, res2) in baseline.iter().zip(specimen) {
            let Kind::Plain {
                mean,
                stddev,
                successes,
                ..
            } = res2.kind()
            else {
                continue;
            };

            let test = welch_t_test(res2.scores().samples(), res1.scores().samples())?;
            let is_higher_better = match workload {
                Some(workload) => workload.is_higher_better(),
                None => res2.is_higher_better(),
            };
            let diff = percent_diff(res1.mean(), res2.mean(), is_higher_better);
            report::specimen_row(
                out,
                res2.name(),
                *successes as usize,
                *mean,
                *stddev,
                diff,
                test.p_value,
            )?;

            if self.recursive {
                let sub1 = Subresults::parse(res1.directory(), false)?;
                let sub2 = Subresults::parse(res2.directory(), false)?;
                for (name, data1) in sub1.iter() {
                    let data2 = sub2.get(name).ok_or_else(|| CompareError::MissingSubresult {
                        name: name.to_string(),
                        directory: res2.directory().to_path_buf(),
                    })?;
                    let test = welch_t_test(data2.samples(), data1.samples())?;
                    let diff = percent_diff(
                        data1.mean(),
                        data2.mean(),
                        res2.is_subresult_higher(name)?,
                    );
                    report::specimen_subrow(
                        out,
                        name,
                        data2.num_samples(),
                        data2.mean(),
                        data2.stddev(),
                        diff,
                        test.p_value,
                    )?;
                }
            }
        }

        if workload.is_none() && self.recursive && should_descend(baseline) {
            for (res1, res2) in baseline.iter().zip(specimen) {
                let children1 = read_run(res1.directory())?;
                let children2 = read_run(res2.directory())?;
                self.write_specimen_rows(&children1, &children2, workload, out)?;
            }
        }
        Ok(())
    }
}

/// Enumerate the result directories of a run (immediate children named
/// `results.*` that are directories), sorted by name, and parse each.
pub fn read_run(dir: &Path) -> Result<Vec<Results>, CompareError> {
    let entries = fs::read_dir(dir).map_err(|source| CompareError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut result_dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CompareError::ListDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        let is_dir = entry
            .file_type()
            .map_err(|source| CompareError::ListDirectory {
                path: entry.path(),
                source,
            })?
            .is_dir();
        if is_dir && entry.file_name().to_string_lossy().starts_with("results.") {
            result_dirs.push(entry.path());
        }
    }
    result_dirs.sort();
    result_dirs
        .iter()
        .map(|d| Results::parse(d).map_err(CompareError::from))
        .collect()
}

/// Recursion predicate: take any sub-benchmark label of the first baseline
/// entry and descend only when `results.<label>` exists under its directory.
fn should_descend(results: &[Results]) -> bool {
    let Some(first) = results.first() else {
        return false;
    };
    let Some(probe) = first.random_subresult_name() else {
        return false;
    };
    first.directory().join(format!("results.{probe}")).exists()
}

fn shape_mismatch(baseline: &[Results], specimen: &[Results]) -> CompareError {
    let parent = |results: &[Results]| {
        results
            .first()
            .and_then(|r| r.directory().parent())
            .map(Path::to_path_buf)
            .unwrap_or_default()
    };
    CompareError::ShapeMismatch {
        baseline: parent(baseline),
        baseline_count: baseline.len(),
        specimen: parent(specimen),
        specimen_count: specimen.len(),
    }
}
