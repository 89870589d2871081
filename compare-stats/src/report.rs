//! Fixed-layout report writers.
//!
//! Column positions match the layout the harness's consumers expect; every
//! writer takes `&mut impl Write` so tests can capture output in a buffer.

use std::io::{self, Write};
use std::path::Path;

use compare_stats_core::Results;

/// The `================` block separator.
pub fn separator(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(80))
}

/// The indented `----------------` rule above a weighted-geomean line.
pub fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "  {}", "-".repeat(78))
}

/// Block heading: the run directory, plus the workload name when one exists.
pub fn block_heading(
    out: &mut impl Write,
    run_dir: &Path,
    workload: Option<&Results>,
) -> io::Result<()> {
    match workload {
        Some(workload) => writeln!(out, "{}: {}", run_dir.display(), workload.name()),
        None => writeln!(out, "{}", run_dir.display()),
    }
}

pub fn baseline_heading(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "  Benchmark           Samples        Mean     Stdev")
}

pub fn specimen_heading(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "  Benchmark           Samples        Mean     Stdev     %Diff     P  Significant"
    )
}

pub fn baseline_row(
    out: &mut impl Write,
    name: &str,
    samples: usize,
    mean: f64,
    stddev: f64,
) -> io::Result<()> {
    writeln!(out, "  {name:<24}{samples:>3}{mean:>12.2}{stddev:>10.2}")
}

pub fn baseline_subrow(
    out: &mut impl Write,
    name: &str,
    samples: usize,
    mean: f64,
    stddev: f64,
) -> io::Result<()> {
    writeln!(out, "    {name:<22}{samples:>3}{mean:>12.2}{stddev:>10.2}")
}

pub fn specimen_row(
    out: &mut impl Write,
    name: &str,
    samples: usize,
    mean: f64,
    stddev: f64,
    diff: f64,
    p_value: f64,
) -> io::Result<()> {
    writeln!(
        out,
        "  {name:<24}{samples:>3}{mean:>12.2}{stddev:>10.2}{diff:>10.2}{p_value:>6.3}{sig:>13}",
        sig = significance(p_value)
    )
}

pub fn specimen_subrow(
    out: &mut impl Write,
    name: &str,
    samples: usize,
    mean: f64,
    stddev: f64,
    diff: f64,
    p_value: f64,
) -> io::Result<()> {
    writeln!(
        out,
        "    {name:<22}{samples:>3}{mean:>12.2}{stddev:>10.2}{diff:>10.2}{p_value:>6.3}{sig:>13}",
        sig = significance(p_value)
    )
}

pub fn baseline_geomean(out: &mut impl Write, mean: f64) -> io::Result<()> {
    writeln!(out, "  Weighted Geomean{mean:>22.2}")
}

pub fn specimen_geomean(out: &mut impl Write, mean: f64, diff: f64) -> io::Result<()> {
    writeln!(out, "  Weighted Geomean{mean:>23.2}{diff:>10.2}")
}

fn significance(p_value: f64) -> &'static str {
    if p_value < 0.01 {
        "Yes"
    } else {
        "*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_baseline_row_columns() {
        let line = capture(|out| baseline_row(out, "crypto.rsa", 10, 1234.5, 6.789));
        assert_eq!(
            line,
            "  crypto.rsa               10     1234.50      6.79\n"
        );
    }

    #[test]
    fn test_specimen_row_significant() {
        let line = capture(|out| specimen_row(out, "crypto.rsa", 10, 1234.5, 6.789, 12.3, 0.001));
        assert_eq!(
            line,
            "  crypto.rsa               10     1234.50      6.79     12.30 0.001          Yes\n"
        );
    }

    #[test]
    fn test_specimen_row_not_significant() {
        let line = capture(|out| specimen_row(out, "crypto.rsa", 10, 1234.5, 6.789, -0.5, 0.5));
        assert!(line.ends_with("            *\n"));
        assert!(line.contains(" 0.500"));
        assert!(line.contains("-0.50"));
    }

    #[test]
    fn test_subrow_indent() {
        let line = capture(|out| baseline_subrow(out, "sub1", 3, 5.0, 0.0));
        assert!(line.starts_with("    sub1                  "));
        assert_eq!(
            line,
            "    sub1                    3        5.00      0.00\n"
        );
    }

    #[test]
    fn test_geomean_lines() {
        let line = capture(|out| baseline_geomean(out, 42.5));
        assert_eq!(line, "  Weighted Geomean                 42.50\n");

        let line = capture(|out| specimen_geomean(out, 44.2, 4.0));
        assert_eq!(line, "  Weighted Geomean                  44.20      4.00\n");
    }

    #[test]
    fn test_separator_and_rule_widths() {
        let sep = capture(separator);
        assert_eq!(sep.trim_end().len(), 80);
        let rule_line = capture(rule);
        assert_eq!(rule_line.trim_end().len(), 80);
        assert!(rule_line.starts_with("  -"));
    }

    #[test]
    fn test_p_value_one_prints_three_decimals() {
        let line = capture(|out| specimen_row(out, "b", 4, 10.0, 0.0, 0.0, 1.0));
        assert!(line.contains(" 1.000"));
        assert!(line.ends_with("*\n"));
    }
}
