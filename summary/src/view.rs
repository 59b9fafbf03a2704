//! Display targets and the renderer that drives them.
//!
//! The renderer never touches a concrete display. It writes through
//! [`SummaryView`], addressing elements by [`Target`], so the same logic runs
//! against the in-memory [`crate::html::HtmlDocument`], the browser DOM, or a
//! recording mock in tests.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::{Bucket, LowUtilizationReport, Resource, TableRow, as_of_label};

/// Element id of the date label.
pub const DATE_LABEL_ID: &str = "util-date-display";

/// An addressable element on the summary page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    DateLabel,
    /// The bucket's table; rows go into its `tbody`.
    TableBody(Bucket),
    Loading(Bucket),
    NoData(Bucket),
    Container(Bucket),
}

impl Target {
    #[must_use]
    pub fn element_id(self) -> String {
        match self {
            Self::DateLabel => DATE_LABEL_ID.to_owned(),
            Self::TableBody(bucket) => format!("{}-table", bucket.key()),
            Self::Loading(bucket) => format!("{}-loading", bucket.key()),
            Self::NoData(bucket) => format!("{}-no-data", bucket.key()),
            Self::Container(bucket) => format!("{}-container", bucket.key()),
        }
    }
}

/// A display surface the renderer can write to.
pub trait SummaryView {
    type Error;

    /// Replace the text content of `target`.
    ///
    /// # Errors
    ///
    /// Implementation-defined, e.g. the element is missing from the document.
    fn set_text(&mut self, target: Target, text: &str) -> Result<(), Self::Error>;

    /// Replace the body rows of the bucket's table.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn set_rows(&mut self, bucket: Bucket, rows: &[TableRow]) -> Result<(), Self::Error>;

    /// Show or hide `target`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn set_visible(&mut self, target: Target, visible: bool) -> Result<(), Self::Error>;
}

/// Render `report` into `view`: the as-of label, then each bucket in
/// [`Bucket::ALL`] order.
///
/// A bucket with entries gets one row per resource in input order, its
/// container shown, and its loading and "no data" indicators hidden. An empty
/// or absent bucket gets its rows cleared, its container hidden, and its
/// "no data" indicator shown. Every element is set explicitly, so rendering
/// over a previously rendered view leaves no stale state.
///
/// # Errors
///
/// Returns the first error reported by `view`; later writes are skipped.
pub fn render_report<V: SummaryView + ?Sized>(report: &LowUtilizationReport, view: &mut V) -> Result<(), V::Error> {
    let label = as_of_label(report.month_end_date.as_deref());
    view.set_text(Target::DateLabel, &label)?;

    for bucket in Bucket::ALL {
        render_bucket(view, bucket, report.bucket(bucket))?;
    }
    Ok(())
}

fn render_bucket<V: SummaryView + ?Sized>(view: &mut V, bucket: Bucket, resources: &[Resource]) -> Result<(), V::Error> {
    let rows = resources.iter().map(TableRow::from).collect::<Vec<_>>();
    let has_rows = !rows.is_empty();

    view.set_rows(bucket, &rows)?;
    view.set_visible(Target::Loading(bucket), false)?;
    view.set_visible(Target::NoData(bucket), !has_rows)?;
    view.set_visible(Target::Container(bucket), has_rows)?;

    tracing::debug!(bucket = bucket.key(), rows = rows.len(), "bucket rendered");
    Ok(())
}
