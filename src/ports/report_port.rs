//! Report generation port trait.

use crate::domain::analysis::AnalysisReport;

/// Port for turning a finished analysis into text.
pub trait ReportPort {
    fn render(&self, report: &AnalysisReport) -> String;
}
