//! In-memory summary page.
//!
//! [`HtmlDocument`] holds the state of every element the renderer addresses
//! and serializes it to an HTML fragment, a full page, or (through `serde`) a
//! JSON snapshot. A fresh document is the page as first served: loading
//! indicators visible, containers and "no data" messages hidden.

#[cfg(test)]
#[path = "html_test.rs"]
mod html_test;

use std::convert::Infallible;

use serde::Serialize;

use crate::view::{SummaryView, Target, render_report};
use crate::{Bucket, LowUtilizationReport, TableRow};

const COLUMN_HEADINGS: [&str; 4] = ["Resource", "Avg. Utilization", "Billing Type", "RDM"];

const PAGE_STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
.util-date-display { color: #555; font-style: italic; }
.util-bucket { margin-top: 2rem; }
.util-bucket table { border-collapse: collapse; min-width: 40rem; }
.util-bucket th, .util-bucket td { border: 1px solid #ccc; padding: 0.35rem 0.75rem; text-align: left; }
.util-bucket th { background: #f3f3f3; }
.util-loading, .util-no-data { color: #777; }";

/// Visibility and text of one element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Element {
    pub visible: bool,
    pub text: String,
}

impl Element {
    fn new(visible: bool, text: impl Into<String>) -> Self {
        Self { visible, text: text.into() }
    }
}

/// Elements belonging to one bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BucketPanel {
    pub bucket: Bucket,
    pub loading: Element,
    pub no_data: Element,
    pub container: Element,
    pub table: Element,
    pub rows: Vec<TableRow>,
}

impl BucketPanel {
    fn new(bucket: Bucket) -> Self {
        Self {
            bucket,
            loading: Element::new(true, "Loading..."),
            no_data: Element::new(
                false,
                format!("No resources below {}% utilization.", bucket.threshold_percent()),
            ),
            container: Element::new(false, ""),
            table: Element::new(true, ""),
            rows: Vec::new(),
        }
    }
}

/// The summary page as a tree of element states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HtmlDocument {
    pub date_label: Element,
    pub below_35: BucketPanel,
    pub below_50: BucketPanel,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocument {
    #[must_use]
    pub fn new() -> Self {
        Self {
            date_label: Element::new(true, ""),
            below_35: BucketPanel::new(Bucket::Below35),
            below_50: BucketPanel::new(Bucket::Below50),
        }
    }

    /// A fresh document with `report` rendered into it.
    #[must_use]
    pub fn rendered(report: &LowUtilizationReport) -> Self {
        let mut doc = Self::new();
        match render_report(report, &mut doc) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        doc
    }

    #[must_use]
    pub fn panel(&self, bucket: Bucket) -> &BucketPanel {
        match bucket {
            Bucket::Below35 => &self.below_35,
            Bucket::Below50 => &self.below_50,
        }
    }

    fn panel_mut(&mut self, bucket: Bucket) -> &mut BucketPanel {
        match bucket {
            Bucket::Below35 => &mut self.below_35,
            Bucket::Below50 => &mut self.below_50,
        }
    }

    /// State of the element `target` addresses.
    #[must_use]
    pub fn element(&self, target: Target) -> &Element {
        match target {
            Target::DateLabel => &self.date_label,
            Target::TableBody(bucket) => &self.panel(bucket).table,
            Target::Loading(bucket) => &self.panel(bucket).loading,
            Target::NoData(bucket) => &self.panel(bucket).no_data,
            Target::Container(bucket) => &self.panel(bucket).container,
        }
    }

    fn element_mut(&mut self, target: Target) -> &mut Element {
        match target {
            Target::DateLabel => &mut self.date_label,
            Target::TableBody(bucket) => &mut self.panel_mut(bucket).table,
            Target::Loading(bucket) => &mut self.panel_mut(bucket).loading,
            Target::NoData(bucket) => &mut self.panel_mut(bucket).no_data,
            Target::Container(bucket) => &mut self.panel_mut(bucket).container,
        }
    }

    /// The date label followed by both bucket sections.
    #[must_use]
    pub fn render_tables_fragment(&self) -> String {
        let mut out = format!(
            "<p id=\"{id}\" class=\"util-date-display\"{style}>{text}</p>\n",
            id = Target::DateLabel.element_id(),
            style = display_style(&self.date_label),
            text = html_escape(&self.date_label.text),
        );
        for bucket in Bucket::ALL {
            out.push_str(&render_bucket_section(self.panel(bucket)));
        }
        out
    }

    /// A complete HTML page around [`Self::render_tables_fragment`].
    #[must_use]
    pub fn render_page(&self, title: &str, total_resources: Option<u64>) -> String {
        let reviewed = total_resources
            .map(|total| format!("<p class=\"util-total\">{total} resources reviewed</p>\n"))
            .unwrap_or_default();
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>\n{PAGE_STYLE}\n</style>\n</head>\n<body>\n\
             <h1>{title}</h1>\n{reviewed}{fragment}</body>\n</html>\n",
            title = html_escape(title),
            fragment = self.render_tables_fragment(),
        )
    }
}

impl SummaryView for HtmlDocument {
    type Error = Infallible;

    fn set_text(&mut self, target: Target, text: &str) -> Result<(), Self::Error> {
        text.clone_into(&mut self.element_mut(target).text);
        Ok(())
    }

    fn set_rows(&mut self, bucket: Bucket, rows: &[TableRow]) -> Result<(), Self::Error> {
        self.panel_mut(bucket).rows = rows.to_vec();
        Ok(())
    }

    fn set_visible(&mut self, target: Target, visible: bool) -> Result<(), Self::Error> {
        self.element_mut(target).visible = visible;
        Ok(())
    }
}

fn render_bucket_section(panel: &BucketPanel) -> String {
    let bucket = panel.bucket;
    let head = COLUMN_HEADINGS
        .iter()
        .map(|heading| format!("<th>{heading}</th>"))
        .collect::<String>();

    format!(
        "<section class=\"util-bucket\" id=\"{key}\">\n\
         <h2>{heading}</h2>\n\
         <div id=\"{loading_id}\" class=\"util-loading\"{loading_style}>{loading_text}</div>\n\
         <div id=\"{no_data_id}\" class=\"util-no-data\"{no_data_style}>{no_data_text}</div>\n\
         <div id=\"{container_id}\" class=\"util-container\"{container_style}>\n\
         <table id=\"{table_id}\"{table_style}>\n\
         <thead><tr>{head}</tr></thead>\n<tbody>\n{body}</tbody>\n</table>\n</div>\n</section>\n",
        key = bucket.key(),
        heading = bucket.heading(),
        loading_id = Target::Loading(bucket).element_id(),
        loading_style = display_style(&panel.loading),
        loading_text = html_escape(&panel.loading.text),
        no_data_id = Target::NoData(bucket).element_id(),
        no_data_style = display_style(&panel.no_data),
        no_data_text = html_escape(&panel.no_data.text),
        container_id = Target::Container(bucket).element_id(),
        container_style = display_style(&panel.container),
        table_id = Target::TableBody(bucket).element_id(),
        table_style = display_style(&panel.table),
        body = render_rows(&panel.rows),
    )
}

/// `<tr>` markup for `rows`, one line per row, cells escaped.
#[must_use]
pub fn render_rows(rows: &[TableRow]) -> String {
    rows.iter()
        .map(|row| {
            let cells = row
                .cells()
                .iter()
                .map(|cell| format!("<td>{}</td>", html_escape(cell)))
                .collect::<String>();
            format!("<tr>{cells}</tr>\n")
        })
        .collect()
}

fn display_style(element: &Element) -> &'static str {
    if element.visible { "" } else { " style=\"display: none\"" }
}

/// Escape text for use in element content or a quoted attribute.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
