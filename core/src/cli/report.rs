use crate::organize::ReorganizeReport;
use std::fmt;

/// Text report formatter for a reorganization run
pub struct TextReport<'a> {
    report: &'a ReorganizeReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a ReorganizeReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        if report.dry_run {
            writeln!(f, "Reorganization Plan (dry run)")?;
            writeln!(f, "=============================")?;
        } else {
            writeln!(f, "Reorganization Summary")?;
            writeln!(f, "======================")?;
        }
        writeln!(f)?;
        writeln!(f, "Files seen:       {}", report.files_seen())?;
        writeln!(f, "Files moved:      {}", report.moved)?;
        writeln!(f, "Already in place: {}", report.already_in_place)?;
        writeln!(f, "Series:           {}", report.series)?;
        writeln!(f, "Uncategorized:    {}", report.uncategorized)?;
        writeln!(f, "Other files:      {}", report.other)?;
        writeln!(f, "Pruned dirs:      {}", report.pruned_dirs)?;
        writeln!(f, "Collisions:       {}", report.collisions())?;
        writeln!(f, "Failures:         {}", report.failures.len())?;

        if !report.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Files left in place")?;
            writeln!(f, "-------------------")?;
            for failure in &report.failures {
                writeln!(f, "{}", failure.source.display())?;
                writeln!(f, "  -> {}: {}", failure.target.display(), failure.reason)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organize::MoveFailure;
    use std::path::PathBuf;

    #[test]
    fn test_text_report_format() {
        let report = ReorganizeReport {
            moved: 3,
            already_in_place: 1,
            series: 2,
            other: 1,
            failures: vec![MoveFailure {
                source: PathBuf::from("/data/b/IM1"),
                target: PathBuf::from("/data/dicoms/P1/S1/E1/IM1.dcm"),
                reason: "Target already exists".to_string(),
                collision: true,
            }],
            ..Default::default()
        };

        let output = format!("{}", TextReport::new(&report));

        assert!(output.contains("Reorganization Summary"));
        assert!(output.contains("Files seen:       5"));
        assert!(output.contains("Files moved:      3"));
        assert!(output.contains("Series:           2"));
        assert!(output.contains("Collisions:       1"));
        assert!(output.contains("/data/b/IM1"));
    }

    #[test]
    fn test_dry_run_heading() {
        let report = ReorganizeReport {
            dry_run: true,
            ..Default::default()
        };

        let output = TextReport::new(&report).to_string();

        assert!(output.contains("(dry run)"));
        assert!(!output.contains("Files left in place"));
    }
}
