use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Op {
    Text(Target, String),
    Rows(Bucket, Vec<TableRow>),
    Visible(Target, bool),
}

#[derive(Default)]
struct RecordingView {
    ops: Vec<Op>,
}

impl RecordingView {
    fn rows(&self, bucket: Bucket) -> Option<&[TableRow]> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Rows(b, rows) if *b == bucket => Some(rows.as_slice()),
            _ => None,
        })
    }

    fn visible(&self, target: Target) -> Option<bool> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Visible(t, visible) if *t == target => Some(*visible),
            _ => None,
        })
    }
}

impl SummaryView for RecordingView {
    type Error = std::convert::Infallible;

    fn set_text(&mut self, target: Target, text: &str) -> Result<(), Self::Error> {
        self.ops.push(Op::Text(target, text.to_owned()));
        Ok(())
    }

    fn set_rows(&mut self, bucket: Bucket, rows: &[TableRow]) -> Result<(), Self::Error> {
        self.ops.push(Op::Rows(bucket, rows.to_vec()));
        Ok(())
    }

    fn set_visible(&mut self, target: Target, visible: bool) -> Result<(), Self::Error> {
        self.ops.push(Op::Visible(target, visible));
        Ok(())
    }
}

/// Fails on the first write to `fail_on`; counts every attempted write.
struct FailingView {
    fail_on: Target,
    writes: usize,
}

impl FailingView {
    fn check(&mut self, target: Target) -> Result<(), String> {
        self.writes += 1;
        if target == self.fail_on {
            return Err(format!("missing element #{}", target.element_id()));
        }
        Ok(())
    }
}

impl SummaryView for FailingView {
    type Error = String;

    fn set_text(&mut self, target: Target, _text: &str) -> Result<(), Self::Error> {
        self.check(target)
    }

    fn set_rows(&mut self, bucket: Bucket, _rows: &[TableRow]) -> Result<(), Self::Error> {
        self.check(Target::TableBody(bucket))
    }

    fn set_visible(&mut self, target: Target, _visible: bool) -> Result<(), Self::Error> {
        self.check(target)
    }
}

fn resource(name: &str, avg: f64, billing: Option<&str>, rdm: Option<&str>) -> Resource {
    Resource {
        name: name.to_owned(),
        avg_utilization: avg,
        billing_type: billing.map(str::to_owned),
        rdm: rdm.map(str::to_owned),
    }
}

fn sample_report() -> LowUtilizationReport {
    LowUtilizationReport {
        month_end_date: Some("2024-06-01".to_owned()),
        below_35: Some(vec![resource("srv1", 0.321, Some("on-demand"), Some("team-a"))]),
        below_50: Some(Vec::new()),
        total_resources: None,
    }
}

fn render(report: &LowUtilizationReport) -> RecordingView {
    let mut view = RecordingView::default();
    let Ok(()) = render_report(report, &mut view);
    view
}

#[test]
fn element_ids_follow_bucket_keys() {
    assert_eq!(Target::DateLabel.element_id(), "util-date-display");
    assert_eq!(Target::TableBody(Bucket::Below35).element_id(), "below-35-table");
    assert_eq!(Target::Loading(Bucket::Below50).element_id(), "below-50-loading");
    assert_eq!(Target::NoData(Bucket::Below35).element_id(), "below-35-no-data");
    assert_eq!(Target::Container(Bucket::Below50).element_id(), "below-50-container");
}

#[test]
fn sample_report_renders_label_rows_and_no_data() {
    let view = render(&sample_report());

    assert_eq!(
        view.ops.first(),
        Some(&Op::Text(Target::DateLabel, "Data as of: June 1, 2024 (4-week average)".to_owned()))
    );

    let rows = view.rows(Bucket::Below35).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells(), ["srv1", "32.1%", "on-demand", "team-a"]);
    assert_eq!(view.visible(Target::Loading(Bucket::Below35)), Some(false));
    assert_eq!(view.visible(Target::Container(Bucket::Below35)), Some(true));
    assert_eq!(view.visible(Target::NoData(Bucket::Below35)), Some(false));

    assert_eq!(view.rows(Bucket::Below50), Some(&[][..]));
    assert_eq!(view.visible(Target::Loading(Bucket::Below50)), Some(false));
    assert_eq!(view.visible(Target::NoData(Bucket::Below50)), Some(true));
    assert_eq!(view.visible(Target::Container(Bucket::Below50)), Some(false));
}

#[test]
fn rows_preserve_input_order() {
    let report = LowUtilizationReport {
        below_50: Some(vec![
            resource("zeta", 0.49, None, None),
            resource("alpha", 0.36, Some("Billing"), None),
            resource("mid", 0.4, None, Some("Sarah")),
        ]),
        ..LowUtilizationReport::default()
    };

    let view = render(&report);
    let names = view
        .rows(Bucket::Below50)
        .unwrap()
        .iter()
        .map(|row| row.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["zeta", "alpha", "mid"]);

    let rows = view.rows(Bucket::Below50).unwrap();
    assert_eq!(rows[0].cells(), ["zeta", "49.0%", "N/A", "N/A"]);
    assert_eq!(rows[1].cells(), ["alpha", "36.0%", "Billing", "N/A"]);
    assert_eq!(rows[2].cells(), ["mid", "40.0%", "N/A", "Sarah"]);
}

#[test]
fn absent_buckets_show_no_data() {
    let view = render(&LowUtilizationReport::default());

    for bucket in Bucket::ALL {
        assert_eq!(view.rows(bucket), Some(&[][..]));
        assert_eq!(view.visible(Target::NoData(bucket)), Some(true));
        assert_eq!(view.visible(Target::Container(bucket)), Some(false));
        assert_eq!(view.visible(Target::Loading(bucket)), Some(false));
    }
    assert_eq!(
        view.ops.first(),
        Some(&Op::Text(Target::DateLabel, "Data as of: Invalid Date (4-week average)".to_owned()))
    );
}

#[test]
fn buckets_render_in_page_order() {
    let view = render(&sample_report());
    let order = view
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Rows(bucket, _) => Some(*bucket),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(order, Bucket::ALL);
}

#[test]
fn rerender_replaces_previous_state() {
    let mut view = RecordingView::default();
    let Ok(()) = render_report(&sample_report(), &mut view);

    let emptied = LowUtilizationReport {
        month_end_date: Some("2024-07-31".to_owned()),
        ..LowUtilizationReport::default()
    };
    let Ok(()) = render_report(&emptied, &mut view);

    assert_eq!(view.rows(Bucket::Below35), Some(&[][..]));
    assert_eq!(view.visible(Target::Container(Bucket::Below35)), Some(false));
    assert_eq!(view.visible(Target::NoData(Bucket::Below35)), Some(true));
}

#[test]
fn view_error_stops_rendering() {
    let mut view = FailingView { fail_on: Target::Loading(Bucket::Below35), writes: 0 };
    let err = render_report(&sample_report(), &mut view).unwrap_err();
    assert_eq!(err, "missing element #below-35-loading");
    // label, rows, then the failing loading toggle
    assert_eq!(view.writes, 3);
}

#[test]
fn view_error_on_label_writes_nothing_else() {
    let mut view = FailingView { fail_on: Target::DateLabel, writes: 0 };
    assert!(render_report(&sample_report(), &mut view).is_err());
    assert_eq!(view.writes, 1);
}
