// services/insight-dash/src/components/chart.rs
//
// Insight Dashboard - SVG charts
// Area chart for the interest evolution, multi-line chart for page series
//

use leptos::*;

use accesstrial_shared::types::EvolutionPoint;

/// Drawing box shared by the path builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 140.0,
            padding: 5.0,
        }
    }
}

impl ChartGeometry {
    fn point(&self, index: usize, count: usize, value: f64, min: f64, max: f64) -> (f64, f64) {
        let x = if count > 1 {
            index as f64 / (count - 1) as f64 * self.width
        } else {
            0.0
        };
        let span = (max - min).max(f64::EPSILON);
        let y = self.height - self.padding - ((value - min) / span) * (self.height - self.padding * 2.0);
        (x, y)
    }
}

/// SVG path through `values`, scaled to `[min, max]`.
pub fn line_path(values: &[f64], min: f64, max: f64, geometry: ChartGeometry) -> String {
    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let (x, y) = geometry.point(i, values.len(), *v, min, max);
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    match points.split_first() {
        None => String::new(),
        Some((first, [])) => format!("M {}", first),
        Some((first, rest)) => format!("M {} L {}", first, rest.join(" L ")),
    }
}

/// Same as [`line_path`], closed along the bottom edge.
pub fn area_path(values: &[f64], min: f64, max: f64, geometry: ChartGeometry) -> String {
    if values.is_empty() {
        return String::new();
    }
    let (last_x, _) = geometry.point(values.len() - 1, values.len(), 0.0, min, max);
    format!(
        "{} L {:.1},{:.1} L 0,{:.1} Z",
        line_path(values, min, max, geometry),
        last_x,
        geometry.height,
        geometry.height
    )
}

#[component]
pub fn EvolutionChart(#[prop(into)] points: Signal<Vec<EvolutionPoint>>) -> impl IntoView {
    let geometry = ChartGeometry::default();
    let values = move || {
        points.with(|p| p.iter().map(|e| e.interest as f64).collect::<Vec<_>>())
    };
    // Percent scale
    let (min, max) = (0.0, 100.0);

    view! {
        <div class="evolution-chart">
            <svg class="chart-svg" viewBox="0 0 400 150" preserveAspectRatio="none">
                <defs>
                    <linearGradient id="interestGradient" x1="0%" y1="0%" x2="0%" y2="100%">
                        <stop offset="5%" stop-color="#3B82F6" stop-opacity="0.8" />
                        <stop offset="95%" stop-color="#3B82F6" stop-opacity="0.1" />
                    </linearGradient>
                </defs>

                // Grid lines
                <line x1="0" y1="37" x2="400" y2="37" class="grid-line" />
                <line x1="0" y1="75" x2="400" y2="75" class="grid-line" />
                <line x1="0" y1="112" x2="400" y2="112" class="grid-line" />

                <path
                    class="chart-area"
                    d=move || area_path(&values(), min, max, geometry)
                    fill="url(#interestGradient)"
                />
                <path
                    class="chart-line"
                    d=move || line_path(&values(), min, max, geometry)
                    fill="none"
                    stroke="#3B82F6"
                    stroke-width="2"
                />
            </svg>

            <div class="chart-labels">
                {move || points.with(|p| {
                    p.iter()
                        .map(|e| view! { <span>{e.month.clone()}</span> })
                        .collect_view()
                })}
            </div>
        </div>
    }
}

/// One coloured series of a [`LineChart`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub values: Vec<f64>,
}

#[component]
pub fn LineChart(
    #[prop(into)] series: Signal<Vec<ChartSeries>>,
    labels: Vec<&'static str>,
) -> impl IntoView {
    let geometry = ChartGeometry::default();
    let bounds = move || {
        series.with(|s| {
            let max = s
                .iter()
                .flat_map(|serie| serie.values.iter().copied())
                .fold(0.0_f64, f64::max);
            (0.0, if max > 0.0 { max * 1.1 } else { 1.0 })
        })
    };

    view! {
        <div class="line-chart">
            <svg class="chart-svg" viewBox="0 0 400 150" preserveAspectRatio="none">
                <line x1="0" y1="37" x2="400" y2="37" class="grid-line" />
                <line x1="0" y1="75" x2="400" y2="75" class="grid-line" />
                <line x1="0" y1="112" x2="400" y2="112" class="grid-line" />

                {move || {
                    let (min, max) = bounds();
                    series.get()
                        .into_iter()
                        .map(|serie| {
                            view! {
                                <path
                                    d=line_path(&serie.values, min, max, geometry)
                                    fill="none"
                                    stroke=serie.color
                                    stroke-width="2"
                                />
                            }
                        })
                        .collect_view()
                }}
            </svg>

            <div class="chart-labels">
                {labels.into_iter().map(|l| view! { <span>{l}</span> }).collect_view()}
            </div>

            <div class="chart-legend">
                {move || series.get()
                    .into_iter()
                    .map(|serie| view! {
                        <span class="legend-item">
                            <span class="legend-dot" style=format!("background: {}", serie.color)></span>
                            {serie.label}
                        </span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_path_spans_width() {
        let path = line_path(&[0.0, 50.0, 100.0], 0.0, 100.0, ChartGeometry::default());
        assert_eq!(path, "M 0.0,135.0 L 200.0,70.0 L 400.0,5.0");
    }

    #[test]
    fn test_empty_and_single_point() {
        let geometry = ChartGeometry::default();
        assert_eq!(line_path(&[], 0.0, 1.0, geometry), "");
        assert_eq!(area_path(&[], 0.0, 1.0, geometry), "");
        assert_eq!(line_path(&[1.0], 0.0, 1.0, geometry), "M 0.0,5.0");
    }

    #[test]
    fn test_area_path_is_closed() {
        let path = area_path(&[10.0, 20.0], 0.0, 20.0, ChartGeometry::default());
        assert!(path.ends_with("L 400.0,140.0 L 0,140.0 Z"));
    }

    #[test]
    fn test_flat_series_does_not_divide_by_zero() {
        let path = line_path(&[5.0, 5.0], 5.0, 5.0, ChartGeometry::default());
        assert!(!path.contains("NaN"));
    }
}
