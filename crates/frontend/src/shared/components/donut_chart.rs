use leptos::prelude::*;

const RADIUS: f64 = 15.915_494_309_189_533; // circumference of 100
const PALETTE: [&str; 8] = [
    "#4f7cff", "#22b07d", "#f5a524", "#e5484d", "#8e4ec6", "#12a5c4", "#ff7a45", "#6b7280",
];

/// One ring segment, expressed in percent of the circumference.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSegment {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
    /// Arc length, 0..=100
    pub length: f64,
    /// Where the arc starts, 0..100, clockwise from 12 o'clock
    pub offset: f64,
}

/// Lays out labelled counts around the ring. Zero counts get no arc but
/// keep their legend entry.
pub fn donut_segments(data: &[(String, usize)]) -> Vec<DonutSegment> {
    let total: usize = data.iter().map(|(_, v)| *v).sum();
    let mut start = 0.0;
    data.iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let length = if total == 0 {
                0.0
            } else {
                *value as f64 * 100.0 / total as f64
            };
            let segment = DonutSegment {
                label: label.clone(),
                value: *value,
                color: PALETTE[i % PALETTE.len()],
                length,
                offset: start,
            };
            start += length;
            segment
        })
        .collect()
}

/// SVG donut with a legend. The total is printed in the hole.
#[component]
pub fn DonutChart(
    #[prop(into)] title: String,
    #[prop(into)] data: Signal<Vec<(String, usize)>>,
    #[prop(optional, into)] caption: Option<String>,
) -> impl IntoView {
    let segments = Memo::new(move |_| donut_segments(&data.get()));
    let total = move || data.with(|d| d.iter().map(|(_, v)| *v).sum::<usize>());

    view! {
        <div class="donut-chart">
            <div class="donut-chart__title">{title}</div>
            <svg class="donut-chart__svg" viewBox="0 0 42 42" width="180" height="180">
                <circle
                    cx="21" cy="21" r=RADIUS
                    fill="transparent" stroke="#e9ecef" stroke-width="5"
                ></circle>
                <For
                    each=move || segments.get().into_iter().filter(|s| s.length > 0.0)
                    key=|s| s.label.clone()
                    children=|s| {
                        // 25 rotates the dash start to 12 o'clock
                        let dash_offset = (25.0 - s.offset).to_string();
                        let dash_array = format!("{} {}", s.length, 100.0 - s.length);
                        view! {
                            <circle
                                cx="21" cy="21" r=RADIUS
                                fill="transparent" stroke=s.color stroke-width="5"
                                stroke-dasharray=dash_array
                                stroke-dashoffset=dash_offset
                            >
                                <title>{format!("{}: {}", s.label, s.value)}</title>
                            </circle>
                        }
                    }
                />
                <text x="21" y="23" text-anchor="middle" class="donut-chart__total">
                    {move || total().to_string()}
                </text>
            </svg>
            <ul class="donut-chart__legend">
                <For
                    each=move || segments.get()
                    key=|s| (s.label.clone(), s.value)
                    children=|s| view! {
                        <li>
                            <span class="donut-chart__swatch" style=format!("background: {}", s.color)></span>
                            <span>{s.label}</span>
                            <span class="donut-chart__value">{s.value}</span>
                        </li>
                    }
                />
            </ul>
            {caption.map(|c| view! { <div class="donut-chart__caption">{c}</div> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(values: &[usize]) -> Vec<(String, usize)> {
        values.iter().enumerate().map(|(i, v)| (format!("d{}", i), *v)).collect()
    }

    #[test]
    fn segments_fill_the_ring_in_order() {
        let segments = donut_segments(&data(&[2, 1, 1]));
        assert_eq!(segments[0].length, 50.0);
        assert_eq!(segments[1].offset, 50.0);
        assert_eq!(segments[2].offset, 75.0);
        let sum: f64 = segments.iter().map(|s| s.length).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_data_draws_no_arcs() {
        let segments = donut_segments(&data(&[0, 0]));
        assert!(segments.iter().all(|s| s.length == 0.0));
        assert_eq!(segments.len(), 2);
    }
}
