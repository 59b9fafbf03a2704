//! Low-utilization report model and formatting helpers.
//!
//! This crate is UI-framework agnostic: [`view::render_report`] drives any
//! [`view::SummaryView`], so the same rendering logic backs the server-side
//! HTML page ([`html::HtmlDocument`]) and the browser DOM binding (`dom`
//! feature).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`view`] | Display targets, the [`view::SummaryView`] seam, and the renderer |
//! | [`html`] | In-memory document that serializes to HTML or a JSON snapshot |
//! | `dom` | `web_sys` binding for the browser (feature `dom`) |

pub mod html;
pub mod view;

#[cfg(feature = "dom")]
pub mod dom;


use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

pub use html::HtmlDocument;
pub use view::{SummaryView, Target, render_report};

/// Placeholder shown for a missing billing type or RDM.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder shown when the month-end date cannot be read.
pub const INVALID_DATE: &str = "Invalid Date";

/// Page title used when none is configured.
pub const DEFAULT_TITLE: &str = "Utilization Summary";

/// Error returned when a payload cannot be decoded into a [`LowUtilizationReport`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid report payload: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// BUCKETS
// =============================================================================

/// Utilization threshold a resource was grouped under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "below_35")]
    Below35,
    #[serde(rename = "below_50")]
    Below50,
}

impl Bucket {
    /// Render order on the page.
    pub const ALL: [Self; 2] = [Self::Below35, Self::Below50];

    /// Element-id prefix, e.g. `below-35`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Below35 => "below-35",
            Self::Below50 => "below-50",
        }
    }

    #[must_use]
    pub fn threshold_percent(self) -> u8 {
        match self {
            Self::Below35 => 35,
            Self::Below50 => 50,
        }
    }

    #[must_use]
    pub fn heading(self) -> String {
        format!("Below {}% Utilization", self.threshold_percent())
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// One resource in a utilization bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    /// Four-week rolling average as a fraction of capacity.
    pub avg_utilization: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdm: Option<String>,
}

impl Resource {
    #[must_use]
    pub fn billing_type_label(&self) -> &str {
        label_or_na(self.billing_type.as_deref())
    }

    #[must_use]
    pub fn rdm_label(&self) -> &str {
        label_or_na(self.rdm.as_deref())
    }

    #[must_use]
    pub fn utilization_label(&self) -> String {
        format_utilization(self.avg_utilization)
    }
}

fn label_or_na(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => NOT_AVAILABLE,
    }
}

/// Precomputed low-utilization report for one month end.
///
/// Every top-level field is optional on the wire: an absent bucket renders as
/// "no data" and an absent date renders as [`INVALID_DATE`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LowUtilizationReport {
    #[serde(default)]
    pub month_end_date: Option<String>,
    #[serde(default)]
    pub below_35: Option<Vec<Resource>>,
    #[serde(default)]
    pub below_50: Option<Vec<Resource>>,
    /// Resources reviewed for the month, when the producer reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_resources: Option<u64>,
}

impl LowUtilizationReport {
    /// Decode a report from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Json`] when the text is not JSON or a resource
    /// entry is missing `name` or a numeric `avg_utilization`.
    pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resources in `bucket`, in input order. Absent lists are empty.
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Resource] {
        let list = match bucket {
            Bucket::Below35 => self.below_35.as_deref(),
            Bucket::Below50 => self.below_50.as_deref(),
        };
        list.unwrap_or_default()
    }
}

// =============================================================================
// TABLE ROWS
// =============================================================================

/// Display cells for one resource, already formatted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub name: String,
    pub utilization: String,
    pub billing_type: String,
    pub rdm: String,
}

impl TableRow {
    /// Cells in column order: name, utilization, billing type, RDM.
    #[must_use]
    pub fn cells(&self) -> [&str; 4] {
        [&self.name, &self.utilization, &self.billing_type, &self.rdm]
    }
}

impl From<&Resource> for TableRow {
    fn from(resource: &Resource) -> Self {
        if !(0.0..=1.0).contains(&resource.avg_utilization) {
            tracing::debug!(
                name = %resource.name,
                avg_utilization = resource.avg_utilization,
                "utilization outside [0, 1]; rendering as given"
            );
        }
        Self {
            name: resource.name.clone(),
            utilization: resource.utilization_label(),
            billing_type: resource.billing_type_label().to_owned(),
            rdm: resource.rdm_label().to_owned(),
        }
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Format a utilization fraction as a percentage with one decimal place.
///
/// The stored value of `fraction * 100` is rounded to the nearest tenth, so
/// `0.0015` (stored just below `0.15`) becomes `0.1%`. A value that sits
/// exactly halfway, like `6.25`, rounds away from zero.
#[must_use]
pub fn format_utilization(fraction: f64) -> String {
    let percent = fraction * 100.0;
    // Exact tenth-ties are odd multiples of 0.25; `{:.1}` rounds them to even.
    let quarters = percent * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let rounded = (percent * 10.0).round() / 10.0;
        return format!("{rounded:.1}%");
    }
    format!("{percent:.1}%")
}

/// Parse a month-end date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, and RFC 3339 timestamps. The
/// calendar date is taken as written; offsets never shift the day.
#[must_use]
pub fn parse_month_end_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(timestamp.date());
    }
    if let Ok(timestamp) =
        PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
    {
        return Some(timestamp.date());
    }
    None
}

/// Long-form US English date, e.g. `June 1, 2024`, or [`INVALID_DATE`].
#[must_use]
pub fn format_month_end_date(raw: Option<&str>) -> String {
    let Some(date) = raw.and_then(parse_month_end_date) else {
        tracing::warn!(month_end_date = ?raw, "month_end_date is not a readable date");
        return INVALID_DATE.to_owned();
    };
    match date.format(format_description!("[month repr:long] [day padding:none], [year padding:none]")) {
        Ok(formatted) => formatted,
        Err(error) => {
            tracing::warn!(%error, %date, "failed to format month_end_date");
            INVALID_DATE.to_owned()
        }
    }
}

/// Text for the date label element.
#[must_use]
pub fn as_of_label(month_end_date: Option<&str>) -> String {
    format!("Data as of: {} (4-week average)", format_month_end_date(month_end_date))
}
