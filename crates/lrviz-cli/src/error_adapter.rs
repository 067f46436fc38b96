//! Conversion of [`LrvizError`] into miette reports.
//!
//! A [`lrviz_parser::error::ParseError`] may carry several diagnostics;
//! each becomes its own report, tied to the snapshot file it points into.
//! Every other error becomes a single report coded by where it came from.

use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report, Severity as MietteSeverity};

use lrviz::LrvizError;
use lrviz_parser::error::{Diagnostic, Severity};

/// Build one report per problem in `err`.
///
/// `source_name` names the snapshot in rendered snippets.
pub fn to_reports(err: &LrvizError, source_name: &str) -> Vec<Report> {
    match err {
        LrvizError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| {
                Report::new(snapshot_diagnostic(diag))
                    .with_source_code(NamedSource::new(source_name, src.clone()))
            })
            .collect(),
        other => vec![Report::new(error_diagnostic(other))],
    }
}

fn snapshot_diagnostic(diag: &Diagnostic) -> MietteDiagnostic {
    let severity = match diag.severity() {
        Severity::Error => MietteSeverity::Error,
        Severity::Warning => MietteSeverity::Warning,
    };
    let labels = diag.labels().iter().map(|label| {
        let span = (label.span().start(), label.span().len());
        let message = Some(label.message().to_string());
        if label.is_primary() {
            LabeledSpan::new_primary_with_span(message, span)
        } else {
            LabeledSpan::new_with_span(message, span)
        }
    });

    let mut report = MietteDiagnostic::new(diag.message())
        .with_severity(severity)
        .with_labels(labels);
    if let Some(code) = diag.code() {
        report = report.with_code(code.as_str());
    }
    if let Some(help) = diag.help() {
        report = report.with_help(help);
    }
    report
}

fn error_diagnostic(err: &LrvizError) -> MietteDiagnostic {
    let report = MietteDiagnostic::new(err.to_string());
    match err {
        LrvizError::Io(_) => report.with_code("lrviz::io"),
        LrvizError::Parse { .. } => report,
        LrvizError::Graph(_) => report.with_code("lrviz::graph"),
        LrvizError::Config(_) => report
            .with_code("lrviz::config")
            .with_help("check the configuration file or pass another one with --config"),
        LrvizError::Export(_) => report.with_code("lrviz::export"),
    }
}
