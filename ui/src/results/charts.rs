use dioxus::prelude::*;

use crate::{core::format, results::ComplianceSummary, t};

const GAUGE_RADIUS: f64 = 52.0;
const GAUGE_TRACK: &str = "#ede9fe";
const BAR_AREA_HEIGHT: f64 = 120.0;
const BAR_WIDTH: f64 = 56.0;
const BAR_GAP: f64 = 48.0;

/// Filled length and full circumference of the gauge stroke.
pub(crate) fn gauge_dash(percentage: u8, radius: f64) -> (f64, f64) {
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let filled = circumference * f64::from(percentage.min(100)) / 100.0;
    (filled, circumference)
}

/// Bar heights scaled so the tallest bar fills `area`.
pub(crate) fn bar_heights(values: &[usize], area: f64) -> Vec<f64> {
    let max = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    values
        .iter()
        .map(|value| *value as f64 / max * area)
        .collect()
}

#[component]
pub fn HealthGauge(summary: ComplianceSummary) -> Element {
    let datum = summary.gauge();
    let (filled, circumference) = gauge_dash(summary.percentage, GAUGE_RADIUS);
    let dash = format!("{filled:.2} {circumference:.2}");
    let label = format::format_percent(summary.percentage);

    rsx! {
        section { class: "chart-card",
            h3 { class: "chart-card__title", {t!("chart-health-title")} }
            svg {
                class: "chart-gauge",
                view_box: "0 0 140 140",
                role: "img",
                "aria-label": "{label}",
                circle {
                    cx: "70",
                    cy: "70",
                    r: "{GAUGE_RADIUS}",
                    fill: "none",
                    stroke: GAUGE_TRACK,
                    stroke_width: "14",
                }
                circle {
                    cx: "70",
                    cy: "70",
                    r: "{GAUGE_RADIUS}",
                    fill: "none",
                    stroke: datum.fill,
                    stroke_width: "14",
                    stroke_linecap: "round",
                    stroke_dasharray: "{dash}",
                    transform: "rotate(-90 70 70)",
                }
                text {
                    class: "chart-gauge__value",
                    x: "70",
                    y: "76",
                    text_anchor: "middle",
                    "{label}"
                }
            }
            p { class: "chart-card__caption", {t!("chart-health-caption")} }
        }
    }
}

#[component]
pub fn StatusDistribution(summary: ComplianceSummary) -> Element {
    let series = summary.distribution();
    let labels = [t!("chart-bar-compliant"), t!("chart-bar-non-compliant")];
    let heights = bar_heights(&series.map(|datum| datum.value), BAR_AREA_HEIGHT);
    let width = BAR_GAP * 3.0 + BAR_WIDTH * 2.0;

    rsx! {
        section { class: "chart-card",
            h3 { class: "chart-card__title", {t!("chart-distribution-title")} }
            svg {
                class: "chart-bars",
                view_box: "0 0 {width} 160",
                role: "img",
                line {
                    x1: "0",
                    x2: "{width}",
                    y1: "{BAR_AREA_HEIGHT + 10.0}",
                    y2: "{BAR_AREA_HEIGHT + 10.0}",
                    stroke: "#e5e7eb",
                }
                for (index, ((datum, height), label)) in series.iter().zip(heights.iter()).zip(labels.iter()).enumerate() {
                    g { key: "{index}",
                        rect {
                            x: "{BAR_GAP + index as f64 * (BAR_WIDTH + BAR_GAP)}",
                            y: "{BAR_AREA_HEIGHT + 10.0 - height}",
                            width: "{BAR_WIDTH}",
                            height: "{height}",
                            rx: "6",
                            fill: datum.fill,
                        }
                        text {
                            class: "chart-bars__value",
                            x: "{BAR_GAP + index as f64 * (BAR_WIDTH + BAR_GAP) + BAR_WIDTH / 2.0}",
                            y: "{BAR_AREA_HEIGHT + 4.0 - height}",
                            text_anchor: "middle",
                            "{datum.value}"
                        }
                        text {
                            class: "chart-bars__label",
                            x: "{BAR_GAP + index as f64 * (BAR_WIDTH + BAR_GAP) + BAR_WIDTH / 2.0}",
                            y: "154",
                            text_anchor: "middle",
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_fills_proportionally() {
        let (empty, circumference) = gauge_dash(0, 10.0);
        assert_eq!(empty, 0.0);
        let (full, _) = gauge_dash(100, 10.0);
        assert!((full - circumference).abs() < 1e-9);
        let (half, _) = gauge_dash(50, 10.0);
        assert!((half - circumference / 2.0).abs() < 1e-9);
        let (clamped, _) = gauge_dash(250, 10.0);
        assert!((clamped - circumference).abs() < 1e-9);
    }

    #[test]
    fn bars_scale_to_tallest() {
        assert_eq!(bar_heights(&[2, 1], 100.0), vec![100.0, 50.0]);
        assert_eq!(bar_heights(&[0, 0], 100.0), vec![0.0, 0.0]);
    }
}
