//! Contains the common [`ErrorKind`] trait used by all parsing errors to display user-facing
//! error messages.

use ariadne::{Color, Label, Report, ReportKind};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::Rgb(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// Implementors provide the message, labels, and optional help text; the report itself is
/// assembled by the provided [`build_report`](ErrorKind::build_report) method. Each label is
/// paired with the span at the same index in the `spans` slice given to `build_report`.
pub trait ErrorKind: Debug + Send {
    /// The top-level message of the error.
    fn message(&self) -> String;

    /// The labels to attach to the error's spans, in order. An empty string attaches the span
    /// with no message.
    fn labels(&self) -> Vec<String>;

    /// An optional help message displayed below the report.
    fn help(&self) -> Option<String> {
        None
    }

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        let offset = spans.first().map_or(0, |span| span.start);
        let mut builder = Report::build(ReportKind::Error, src_id, offset)
            .with_message(self.message())
            .with_labels(
                self.labels()
                    .into_iter()
                    .zip(spans.iter())
                    .map(|(label_str, span)| {
                        let mut label = Label::new((src_id, span.clone()))
                            .with_color(EXPR);

                        if !label_str.is_empty() {
                            label = label.with_message(label_str);
                        }

                        label
                    })
                    .collect::<Vec<_>>()
            );

        if let Some(help) = self.help() {
            builder.set_help(help);
        }
        builder.finish()
    }
}
