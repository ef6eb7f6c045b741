use std::rc::Rc;

use dioxus::prelude::*;
use thiserror::Error;
use time::{macros::format_description, OffsetDateTime};

use crate::analysis::{AnalysisResult, ObligationFinding};
use crate::core::format;
#[cfg(not(target_arch = "wasm32"))]
use crate::core::platform;
use crate::results::summarize;
use crate::t;

const BOM: char = '\u{feff}';
const LIST_SEPARATOR: &str = " | ";
#[cfg(target_arch = "wasm32")]
const REPORT_MIME: &str = "text/csv;charset=utf-8";

const COLUMNS: [&str; 10] = [
    "Obligation",
    "Status",
    "Reason",
    "Confidence (%)",
    "Similarity Score",
    "Page",
    "Line",
    "Suggestion",
    "Supporting Clauses",
    "Validation Steps",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not format export timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("download failed: {0}")]
    Download(String),
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Who exported the report and when.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub exported_at: OffsetDateTime,
    pub operator: String,
}

/// Where the report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDelivery {
    /// The browser was handed a download.
    Downloaded,
    /// Written to disk on desktop.
    Saved(String),
}

/// Comma-delimited report: a header block, a blank line, the column header
/// and one row per finding. Starts with a UTF-8 byte-order mark.
pub fn build_report(results: &[ObligationFinding], meta: &ReportMeta) -> Result<String, ExportError> {
    let summary = summarize(results);
    let exported_at = meta.exported_at.to_offset(time::UtcOffset::UTC).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))?;

    let mut rows: Vec<Vec<String>> = vec![
        vec!["Contract Analysis Report".into()],
        vec!["Export Date".into(), exported_at],
        vec!["Analyzed By".into(), meta.operator.clone()],
        vec!["Total Obligations".into(), summary.total.to_string()],
        vec!["Compliant".into(), summary.compliant.to_string()],
        vec!["Non-Compliant".into(), summary.non_compliant.to_string()],
        vec!["Compliance Score".into(), format::format_percent(summary.percentage)],
        Vec::new(),
        COLUMNS.iter().map(|column| column.to_string()).collect(),
    ];

    for finding in results {
        let steps = finding
            .cot_steps
            .iter()
            .map(|step| step.flatten())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR);

        rows.push(vec![
            finding.obligation.clone(),
            finding.is_present.as_str().to_string(),
            finding.reason.clone(),
            format::format_optional_number(finding.confidence),
            format::format_optional_number(finding.similarity_score),
            finding.page.map(|page| page.to_string()).unwrap_or_default(),
            finding.line.map(|line| line.to_string()).unwrap_or_default(),
            finding.suggestion.clone().unwrap_or_default(),
            finding.supporting_clauses.join(LIST_SEPARATOR),
            steps,
        ]);
    }

    let mut csv = String::from(BOM);
    let lines: Vec<String> = rows
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|field| escape_csv(field))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    csv.push_str(&lines.join("\n"));
    Ok(csv)
}

pub fn report_filename(date: OffsetDateTime) -> String {
    let day = date
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "export".into());
    format!("contract-analysis-report-{day}.csv")
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Done(ReportDelivery),
    Error(String),
}

/// Export and Print buttons for the results header.
#[component]
pub fn ReportActions(result: Rc<AnalysisResult>, operator: String) -> Element {
    let mut status = use_signal(|| ExportStatus::Idle);

    let export_handler = move |_| {
        let meta = ReportMeta {
            exported_at: OffsetDateTime::now_utc(),
            operator: operator.clone(),
        };
        let outcome = build_report(&result.results, &meta).and_then(|csv| {
            deliver_report(&report_filename(meta.exported_at), csv.into_bytes())
        });
        match outcome {
            Ok(delivery) => {
                tracing::info!(?delivery, "report exported");
                status.set(ExportStatus::Done(delivery));
            }
            Err(err) => {
                tracing::warn!("report export failed: {err}");
                status.set(ExportStatus::Error(err.to_string()));
            }
        }
    };

    let print_handler = move |_| {
        let _ = document::eval("window.print();");
    };

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Done(ReportDelivery::Downloaded) => {
            Some(("report-actions__feedback", t!("export-download-started")))
        }
        ExportStatus::Done(ReportDelivery::Saved(path)) => {
            Some(("report-actions__feedback", t!("export-saved", path = path)))
        }
        ExportStatus::Error(err) => Some((
            "report-actions__feedback report-actions__feedback--error",
            t!("export-failed", error = err),
        )),
    };

    rsx! {
        div { class: "report-actions",
            button {
                r#type: "button",
                class: "button button--soft",
                onclick: export_handler,
                {t!("results-export")}
            }
            button {
                r#type: "button",
                class: "button button--soft",
                onclick: print_handler,
                {t!("results-print")}
            }
            if let Some((class_name, message)) = feedback {
                span { class: "{class_name}", role: "status", "{message}" }
            }
        }
    }
}

fn deliver_report(filename: &str, bytes: Vec<u8>) -> Result<ReportDelivery, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let download = |msg: &str| ExportError::Download(msg.to_string());

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(REPORT_MIME);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| download("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| download("unable to create download URL"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| download("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| download("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| download("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| download("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(ReportDelivery::Downloaded)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let dir = platform::data_dir()
            .map_err(|err| ExportError::Download(err.to_string()))?
            .join("exports");
        let path = dir.join(filename);
        let write_err = |source| ExportError::Write {
            path: path.to_string_lossy().to_string(),
            source,
        };
        std::fs::create_dir_all(&dir).map_err(write_err)?;
        std::fs::write(&path, bytes).map_err(write_err)?;
        Ok(ReportDelivery::Saved(path.to_string_lossy().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{fixtures, StepStatus};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use time::macros::datetime;

    const HEADER_ROWS: usize = 9;

    fn meta() -> ReportMeta {
        ReportMeta {
            exported_at: datetime!(2026-03-04 09:15:30.250 UTC),
            operator: "Ada".into(),
        }
    }

    /// Minimal RFC 4180 reader: quoted fields, doubled quotes, embedded newlines.
    fn parse_csv(input: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            match (quoted, ch) {
                (true, '"') if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                (true, '"') => quoted = false,
                (true, other) => field.push(other),
                (false, '"') => quoted = true,
                (false, ',') => row.push(std::mem::take(&mut field)),
                (false, '\n') => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                (false, other) => field.push(other),
            }
        }
        row.push(field);
        rows.push(row);
        rows
    }

    fn sample() -> Vec<ObligationFinding> {
        let mut first = fixtures::finding("Pay rent, monthly", "Yes");
        first.supporting_clauses = vec!["Rent is \"due\"".into(), "Late fee".into()];
        first.cot_steps = vec![
            fixtures::step("Match Analysis", StepStatus::Pass),
            fixtures::step("Discretion Check", StepStatus::Fail),
        ];
        let mut second = fixtures::finding("Insure premises", "No");
        second.suggestion = Some("Add an insurance clause\nwith limits".into());
        second.confidence = None;
        fixtures::result(vec![first, second, fixtures::finding("Audit", "Yes")]).results
    }

    #[test]
    fn report_starts_with_bom_and_header_block() {
        let report = build_report(&sample(), &meta()).unwrap();
        assert!(report.starts_with('\u{feff}'));

        let rows = parse_csv(report.trim_start_matches('\u{feff}'));
        assert_eq!(rows[0], vec!["Contract Analysis Report"]);
        assert_eq!(rows[1], vec!["Export Date", "2026-03-04T09:15:30.250Z"]);
        assert_eq!(rows[2], vec!["Analyzed By", "Ada"]);
        assert_eq!(rows[3], vec!["Total Obligations", "3"]);
        assert_eq!(rows[4], vec!["Compliant", "2"]);
        assert_eq!(rows[5], vec!["Non-Compliant", "1"]);
        assert_eq!(rows[6], vec!["Compliance Score", "67%"]);
        assert_eq!(rows[7], vec![""]);
        assert_eq!(rows[8].len(), COLUMNS.len());
        assert_eq!(rows.len(), HEADER_ROWS + 3);
    }

    #[test]
    fn rows_join_lists_and_escape_fields() {
        let report = build_report(&sample(), &meta()).unwrap();
        let rows = parse_csv(report.trim_start_matches('\u{feff}'));

        let first = &rows[HEADER_ROWS];
        assert_eq!(first[0], "Pay rent, monthly");
        assert_eq!(first[1], "Yes");
        assert_eq!(first[3], "85");
        assert_eq!(first[4], "0.82");
        assert_eq!(first[8], "Rent is \"due\" | Late fee");
        assert_eq!(
            first[9],
            "Match Analysis: PASS - Match Analysis finding | Discretion Check: FAIL - Discretion Check finding"
        );

        let second = &rows[HEADER_ROWS + 1];
        assert_eq!(second[3], "");
        assert_eq!(second[7], "Add an insurance clause\nwith limits");
    }

    #[test]
    fn filename_uses_iso_date() {
        assert_eq!(
            report_filename(datetime!(2026-03-04 23:59 UTC)),
            "contract-analysis-report-2026-03-04.csv"
        );
    }

    #[test]
    fn escaping_quotes_only_when_needed() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("line\r\nbreak"), "\"line\r\nbreak\"");
    }

    proptest! {
        #[test]
        fn report_round_trips_free_text(
            entries in prop::collection::vec(
                (
                    "[a-zA-Z ,\"\n|]{0,24}",
                    "[a-zA-Z ,\"\n]{0,24}",
                    proptest::option::of("[a-zA-Z ,\"\n]{1,24}"),
                    prop::collection::vec("[a-zA-Z,\"]{1,12}", 0..3),
                ),
                1..6,
            )
        ) {
            let findings: Vec<ObligationFinding> = entries
                .iter()
                .map(|(obligation, reason, suggestion, clauses)| {
                    let mut finding = fixtures::finding(obligation, "No");
                    finding.reason = reason.clone();
                    finding.suggestion = suggestion.clone();
                    finding.supporting_clauses = clauses.clone();
                    finding
                })
                .collect();

            let report = build_report(&findings, &meta()).unwrap();
            let rows = parse_csv(report.trim_start_matches('\u{feff}'));
            prop_assert_eq!(rows.len(), HEADER_ROWS + findings.len());

            for (row, finding) in rows[HEADER_ROWS..].iter().zip(&findings) {
                prop_assert_eq!(row.len(), COLUMNS.len());
                prop_assert_eq!(&row[0], &finding.obligation);
                prop_assert_eq!(&row[2], &finding.reason);
                prop_assert_eq!(&row[7], &finding.suggestion.clone().unwrap_or_default());
                prop_assert_eq!(&row[8], &finding.supporting_clauses.join(" | "));
            }
        }
    }
}
