//! Browser binding: renders into the live page through `web_sys`.
//!
//! This is the only module that touches the DOM. Elements are looked up by
//! the ids [`Target::element_id`] produces; a missing element is reported as
//! an error instead of being skipped.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::html::render_rows;
use crate::view::{SummaryView, Target, render_report};
use crate::{Bucket, LowUtilizationReport, TableRow};

/// [`SummaryView`] over a `web_sys::Document`.
pub struct DomView {
    document: Document,
}

impl DomView {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// View over `window.document`.
    ///
    /// # Errors
    ///
    /// Returns `Err` outside a browser window context.
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self::new(document))
    }

    fn element(&self, target: Target) -> Result<HtmlElement, JsValue> {
        let id = target.element_id();
        let element = self
            .document
            .get_element_by_id(&id)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?;
        element
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str(&format!("element #{id} is not an HTML element")))
    }

    fn table_body(&self, bucket: Bucket) -> Result<Element, JsValue> {
        let table = self.element(Target::TableBody(bucket))?;
        table
            .query_selector("tbody")?
            .ok_or_else(|| JsValue::from_str(&format!("table #{} has no tbody", table.id())))
    }
}

impl SummaryView for DomView {
    type Error = JsValue;

    fn set_text(&mut self, target: Target, text: &str) -> Result<(), Self::Error> {
        self.element(target)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_rows(&mut self, bucket: Bucket, rows: &[TableRow]) -> Result<(), Self::Error> {
        self.table_body(bucket)?.set_inner_html(&render_rows(rows));
        Ok(())
    }

    fn set_visible(&mut self, target: Target, visible: bool) -> Result<(), Self::Error> {
        let display = if visible { "" } else { "none" };
        self.element(target)?.style().set_property("display", display)
    }
}

/// Entry point for page scripts: render a report object into the current page.
///
/// # Errors
///
/// Returns `Err` when `data` is not a valid report or a target element is
/// missing from the page.
#[wasm_bindgen(js_name = handleLowUtilizationData)]
pub fn handle_low_utilization_data(data: JsValue) -> Result<(), JsValue> {
    let raw = String::from(js_sys::JSON::stringify(&data)?);
    let report = LowUtilizationReport::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut view = DomView::from_window()?;
    render_report(&report, &mut view)
}
