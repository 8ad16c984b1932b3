//! HTML dashboard rendering.
//!
//! Produces one self-contained page: selector controls, metric cards, tables and
//! inline SVG charts (pie, bar, stacked bar, histogram, scatter with trend line,
//! line). Every chart falls back to a "no data" note when its input is empty.

use crate::aggregate::{CategoryCount, MISSING_LABEL, GroupMean, Scatter, StackedCount, TripRow};
use crate::stats::Bin;
use crate::structs::{FareCategory, Selector};
use crate::transform::Dashboard;

pub const NO_DATA: &str = "No data available.";
pub const NO_ZERO_FARE: &str = "No trips with zero fare.";

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 340.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 64.0;

const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 24px; color: #212529; background: #fafafa; }
h1 { margin-bottom: 4px; }
section { background: #fff; border: 1px solid #dee2e6; border-radius: 4px; padding: 12px 16px; margin: 16px 0; }
h2 { font-size: 18px; margin: 0 0 8px 0; }
.cards { display: flex; gap: 16px; }
.card { flex: 1; border: 1px solid #dee2e6; border-radius: 4px; padding: 8px 12px; }
.card .label { font-size: 13px; color: #495057; }
.card .value { font-size: 28px; font-weight: 600; }
.controls label { margin-right: 16px; }
.no-data { color: #868e96; font-style: italic; }
table { border-collapse: collapse; font-size: 13px; }
th, td { border: 1px solid #dee2e6; padding: 4px 8px; text-align: left; }
th { background: #f1f3f5; }
svg text { font-family: sans-serif; font-size: 11px; fill: #495057; }
.axis { stroke: #adb5bd; stroke-width: 1; }
.legend span { display: inline-block; width: 10px; height: 10px; margin: 0 4px 0 12px; }
"#;

/// Renders the dashboard sections, in their fixed order, as an HTML page.
pub fn render_html(d: &Dashboard) -> String {
    let a = &d.aggregates;
    let mut body = String::new();

    body.push_str(&controls(d));

    body.push_str(&section(
        "Key Trip Insights",
        &cards(&[
            ("Total Trips", a.metrics.total_trips.to_string()),
            (
                "Total Distance Traveled (km)",
                format_rounded(a.metrics.total_distance),
            ),
            ("Total Fare Spent", format_thousands(a.metrics.total_fare)),
        ]),
    ));

    body.push_str(&section(
        "Trip Status Distribution",
        &pie_chart(&counts_as_values(&a.status_counts)),
    ));
    body.push_str(&section(
        "Average Fare per City",
        &bar_chart(&means_as_values(&a.avg_fare_by_city), "city", "Average Fare"),
    ));
    body.push_str(&section(
        "Average Distance per Product Type",
        &bar_chart(
            &means_as_values(&a.avg_distance_by_product),
            "product_type",
            "Average Distance (km)",
        ),
    ));
    body.push_str(&section(
        "Average Ride Duration per City",
        &bar_chart(
            &means_as_values(&a.avg_duration_by_city),
            "city",
            "Average Duration (mins)",
        ),
    ));
    body.push_str(&section(
        "Fare per Kilometer",
        &histogram_chart(&a.fare_per_km_histogram, "Fare per Kilometer (INR)", "count"),
    ));
    body.push_str(&section(
        "Trips in Different Hour Ranges",
        &bar_chart(&counts_as_values(&a.hour_range_counts), "Hour Range", "Trip Count"),
    ));
    body.push_str(&section(
        "High-Fare vs Low-Fare Distribution by City",
        &stacked_bar_chart(&a.fare_category_by_city, "city", "Trip Count"),
    ));
    body.push_str(&section(
        "City with the Longest Average Distance",
        &longest_city_text(a.longest_distance_city.as_ref()),
    ));
    body.push_str(&section(
        "Ride Duration vs Fare",
        &scatter_chart(&a.duration_vs_fare, "Duration (mins)", "Fare Amount"),
    ));
    body.push_str(&section(
        "Trips with Zero Fare",
        &zero_fare_table(&a.zero_fare_trips),
    ));
    body.push_str(&section(
        "Trip Count per City",
        &bar_chart(&counts_as_values(&a.city_counts), "City", "Trip Count"),
    ));
    body.push_str(&section(
        "Trip Count per Hour",
        &histogram_chart(&a.hour_histogram, "Hour", "Count"),
    ));
    body.push_str(&section(
        "Trips per Day of the Week",
        &bar_chart(&counts_as_values(&a.day_counts), "Day", "Trip Count"),
    ));
    body.push_str(&section(
        "Ride Duration Analysis",
        &histogram_chart(&a.duration_histogram, "Duration (mins)", "Frequency"),
    ));
    body.push_str(&section(
        "Fare Distribution",
        &histogram_chart(&a.fare_histogram, "Fare Amount", "Frequency"),
    ));
    body.push_str(&section(
        "Distance vs Fare",
        &scatter_chart(&a.distance_vs_fare, "Distance (km)", "Fare Amount"),
    ));
    body.push_str(&section(
        "Monthly Trip Trends",
        &line_chart(&counts_as_values(&a.month_counts), "Month", "Trip Count"),
    ));
    body.push_str(&section(
        "Peak Travel Times",
        &peak_text(a.peak_hour, a.peak_day.as_deref()),
    ));
    body.push_str(&section(
        "Most Expensive Trips",
        &fare_table(&a.most_expensive),
    ));
    body.push_str(&section("Cheapest Trips", &fare_table(&a.cheapest)));
    body.push_str(&section("Data Quality", &data_quality(d)));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Trip Data Analysis</title>
<style>{STYLE}</style>
</head>
<body>
<h1>Trip Data Analysis</h1>
{body}
</body>
</html>
"#
    )
}

fn section(title: &str, content: &str) -> String {
    format!(
        "<section>\n<h2>{}</h2>\n{}\n</section>\n",
        escape_html(title),
        content
    )
}

fn no_data(text: &str) -> String {
    format!(r#"<p class="no-data">{}</p>"#, escape_html(text))
}

fn controls(d: &Dashboard) -> String {
    format!(
        r#"<section class="controls">
<label>Select City {}</label>
<label>Select Product Type {}</label>
</section>
"#,
        select("city", &d.selectors.cities, &d.filter.city),
        select("product_type", &d.selectors.product_types, &d.filter.product_type),
    )
}

fn select(name: &str, options: &[String], current: &Selector) -> String {
    let current = current.to_string();
    let mut s = format!(r#"<select name="{}" disabled>"#, escape_html(name));
    for option in options {
        let selected = if *option == current { " selected" } else { "" };
        s.push_str(&format!(
            "<option{}>{}</option>",
            selected,
            escape_html(option)
        ));
    }
    // a selection that is not among the observed values still shows up
    if !options.contains(&current) {
        s.push_str(&format!(
            "<option selected>{}</option>",
            escape_html(&current)
        ));
    }
    s.push_str("</select>");
    s
}

fn cards(items: &[(&str, String)]) -> String {
    let mut s = String::from(r#"<div class="cards">"#);
    for (label, value) in items {
        s.push_str(&format!(
            r#"<div class="card"><div class="label">{}</div><div class="value">{}</div></div>"#,
            escape_html(label),
            escape_html(value)
        ));
    }
    s.push_str("</div>");
    s
}

pub fn longest_city_text(city: Option<&GroupMean>) -> String {
    match city {
        Some(GroupMean {
            group,
            mean: Some(mean),
        }) => format!(
            "<p>The city with the longest average distance is {} with an average of {} km.</p>",
            escape_html(group),
            format_rounded(*mean)
        ),
        _ => no_data(NO_DATA),
    }
}

pub fn peak_text(hour: Option<u32>, day: Option<&str>) -> String {
    match (hour, day) {
        (None, None) => no_data(NO_DATA),
        _ => format!(
            "<p>Most frequent travel hour: <b>{}</b></p>\n<p>Most frequent travel day: <b>{}</b></p>",
            hour.map_or_else(|| "n/a".to_string(), |h| format!("{}:00", h)),
            escape_html(day.unwrap_or("n/a"))
        ),
    }
}

pub fn zero_fare_table(rows: &[TripRow]) -> String {
    if rows.is_empty() {
        return format!("<p>{}</p>", NO_ZERO_FARE);
    }
    table(
        &["city", "product_type", "request_time", "begin_trip_time", "dropoff_time"],
        rows.iter()
            .map(|r| {
                vec![
                    text_cell(r.city.as_deref()),
                    text_cell(r.product_type.as_deref()),
                    text_cell(r.request_time.as_deref()),
                    text_cell(r.begin_trip_time.as_deref()),
                    text_cell(r.dropoff_time.as_deref()),
                ]
            })
            .collect(),
    )
}

fn fare_table(rows: &[TripRow]) -> String {
    if rows.is_empty() {
        return no_data(NO_DATA);
    }
    table(
        &["city", "fare_amount", "distance", "request_time", "dropoff_time"],
        rows.iter()
            .map(|r| {
                vec![
                    text_cell(r.city.as_deref()),
                    number_cell(r.fare_amount),
                    number_cell(r.distance),
                    text_cell(r.request_time.as_deref()),
                    text_cell(r.dropoff_time.as_deref()),
                ]
            })
            .collect(),
    )
}

fn data_quality(d: &Dashboard) -> String {
    let report = &d.data_quality;
    let mut columns: Vec<&String> = report.invalid.keys().chain(report.missing.keys()).collect();
    columns.sort();
    columns.dedup();

    let mut s = format!("<p>Rows loaded: {}</p>", report.rows);
    if columns.is_empty() {
        s.push_str("<p>Every value was present and parsed.</p>");
        return s;
    }
    s.push_str(&table(
        &["column", "unparseable", "empty"],
        columns
            .into_iter()
            .map(|c| {
                vec![
                    escape_html(c),
                    report.invalid.get(c).copied().unwrap_or(0).to_string(),
                    report.missing.get(c).copied().unwrap_or(0).to_string(),
                ]
            })
            .collect(),
    ));
    s
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut s = String::from("<table>\n<tr>");
    for h in headers {
        s.push_str(&format!("<th>{}</th>", escape_html(h)));
    }
    s.push_str("</tr>\n");
    for row in rows {
        s.push_str("<tr>");
        for cell in row {
            s.push_str(&format!("<td>{}</td>", cell));
        }
        s.push_str("</tr>\n");
    }
    s.push_str("</table>");
    s
}

fn text_cell(value: Option<&str>) -> String {
    escape_html(value.unwrap_or("NaN"))
}

fn number_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

// A chart made only of zero buckets or of the missing group shows no data.
fn counts_as_values(counts: &[CategoryCount]) -> Vec<(String, f64)> {
    let observed = counts
        .iter()
        .any(|c| c.count > 0 && c.category != MISSING_LABEL);
    if !observed {
        return Vec::new();
    }
    counts
        .iter()
        .map(|c| (c.category.clone(), c.count as f64))
        .collect()
}

// Groups with an undefined mean have no bar.
fn means_as_values(means: &[GroupMean]) -> Vec<(String, f64)> {
    means
        .iter()
        .filter_map(|g| g.mean.map(|m| (g.group.clone(), m)))
        .collect()
}

// ── SVG charts ──────────────────────────────────────────────────────────────

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Maps `v` from `[min, max]` onto the horizontal plot area.
fn scale_x(v: f64, min: f64, max: f64) -> f64 {
    MARGIN_LEFT + (v - min) / (max - min) * plot_width()
}

/// Maps `v` from `[min, max]` onto the vertical plot area, growing upwards.
fn scale_y(v: f64, min: f64, max: f64) -> f64 {
    MARGIN_TOP + plot_height() - (v - min) / (max - min) * plot_height()
}

fn svg_open() -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    )
}

fn axes(x_label: &str, y_label: &str, y_min: f64, y_max: f64) -> String {
    let x0 = MARGIN_LEFT;
    let x1 = WIDTH - MARGIN_RIGHT;
    let y0 = MARGIN_TOP + plot_height();
    format!(
        r#"<line class="axis" x1="{x0}" y1="{y0}" x2="{x1}" y2="{y0}"/>
<line class="axis" x1="{x0}" y1="{MARGIN_TOP}" x2="{x0}" y2="{y0}"/>
<text x="{lx}" y="{MARGIN_TOP}" text-anchor="end" dominant-baseline="middle">{top}</text>
<text x="{lx}" y="{y0}" text-anchor="end" dominant-baseline="middle">{bottom}</text>
<text x="{cx}" y="{xl}" text-anchor="middle">{x_label}</text>
<text x="14" y="{cy}" text-anchor="middle" transform="rotate(-90 14 {cy})">{y_label}</text>
"#,
        lx = x0 - 6.0,
        top = format_tick(y_max),
        bottom = format_tick(y_min),
        cx = x0 + plot_width() / 2.0,
        xl = HEIGHT - 8.0,
        cy = MARGIN_TOP + plot_height() / 2.0,
        x_label = escape_html(x_label),
        y_label = escape_html(y_label),
    )
}

/// Value range for the y axis, always including zero so bars have a baseline.
fn y_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo == hi { (lo, lo + 1.0) } else { (lo, hi) }
}

pub fn bar_chart(items: &[(String, f64)], x_label: &str, y_label: &str) -> String {
    if items.is_empty() {
        return no_data(NO_DATA);
    }
    let (y_min, y_max) = y_range(items.iter().map(|(_, v)| *v));
    let slot = plot_width() / items.len() as f64;
    let zero = scale_y(0.0, y_min, y_max);

    let mut s = svg_open();
    s.push_str(&axes(x_label, y_label, y_min, y_max));
    for (i, (label, value)) in items.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + slot * 0.1;
        let y = scale_y(*value, y_min, y_max);
        let (top, height) = if y < zero { (y, zero - y) } else { (zero, y - zero) };
        s.push_str(&format!(
            r#"<rect x="{x:.2}" y="{top:.2}" width="{w:.2}" height="{height:.2}" fill="{fill}"><title>{label}: {value}</title></rect>
<text x="{cx:.2}" y="{ly:.2}" text-anchor="middle">{short}</text>
"#,
            w = slot * 0.8,
            fill = PALETTE[0],
            label = escape_html(label),
            value = format_tick(*value),
            cx = x + slot * 0.4,
            ly = zero + 14.0,
            short = escape_html(&truncate(label, (slot / 7.0) as usize)),
        ));
    }
    s.push_str("</svg>");
    s
}

pub fn stacked_bar_chart(stacks: &[StackedCount], x_label: &str, y_label: &str) -> String {
    if stacks.is_empty() {
        return no_data(NO_DATA);
    }

    // stacks arrive grouped and sorted by group
    let mut groups: Vec<(&str, Vec<&StackedCount>)> = Vec::new();
    for stack in stacks {
        let same_group = groups
            .last()
            .is_some_and(|(group, _)| *group == stack.group.as_str());
        match groups.last_mut() {
            Some((_, parts)) if same_group => parts.push(stack),
            _ => groups.push((stack.group.as_str(), vec![stack])),
        }
    }

    let (y_min, y_max) = y_range(
        groups
            .iter()
            .map(|(_, parts)| parts.iter().map(|p| p.count as f64).sum::<f64>()),
    );
    let slot = plot_width() / groups.len() as f64;
    let colour = |c: FareCategory| match c {
        FareCategory::High => PALETTE[1],
        FareCategory::Low => PALETTE[0],
    };

    let mut s = svg_open();
    s.push_str(&axes(x_label, y_label, y_min, y_max));
    for (i, (group, parts)) in groups.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + slot * 0.1;
        let mut base = 0.0;
        for part in parts {
            let top_value = base + part.count as f64;
            let y_top = scale_y(top_value, y_min, y_max);
            let y_bottom = scale_y(base, y_min, y_max);
            s.push_str(&format!(
                r#"<rect x="{x:.2}" y="{y_top:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}"><title>{group} / {series}: {count}</title></rect>
"#,
                w = slot * 0.8,
                h = y_bottom - y_top,
                fill = colour(part.series),
                group = escape_html(group),
                series = part.series.label(),
                count = part.count,
            ));
            base = top_value;
        }
        s.push_str(&format!(
            r#"<text x="{cx:.2}" y="{ly:.2}" text-anchor="middle">{short}</text>
"#,
            cx = x + slot * 0.4,
            ly = MARGIN_TOP + plot_height() + 14.0,
            short = escape_html(&truncate(group, (slot / 7.0) as usize)),
        ));
    }
    s.push_str("</svg>");
    s.push_str(&format!(
        r#"<div class="legend"><span style="background:{}"></span>{}<span style="background:{}"></span>{}</div>"#,
        colour(FareCategory::High),
        FareCategory::High.label(),
        colour(FareCategory::Low),
        FareCategory::Low.label(),
    ));
    s
}

pub fn histogram_chart(bins: &[Bin], x_label: &str, y_label: &str) -> String {
    if bins.iter().all(|b| b.count == 0) {
        return no_data(NO_DATA);
    }
    let (y_min, y_max) = y_range(bins.iter().map(|b| b.count as f64));
    let slot = plot_width() / bins.len() as f64;
    let zero = scale_y(0.0, y_min, y_max);

    let mut s = svg_open();
    s.push_str(&axes(x_label, y_label, y_min, y_max));
    for (i, bin) in bins.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64;
        let y = scale_y(bin.count as f64, y_min, y_max);
        s.push_str(&format!(
            r##"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}" stroke="#fff"><title>[{start}, {end}): {count}</title></rect>
"##,
            w = slot,
            h = zero - y,
            fill = PALETTE[0],
            start = format_tick(bin.start),
            end = format_tick(bin.end),
            count = bin.count,
        ));
    }
    let (first, last) = (&bins[0], &bins[bins.len() - 1]);
    s.push_str(&format!(
        r#"<text x="{MARGIN_LEFT}" y="{ly:.2}" text-anchor="start">{lo}</text>
<text x="{rx:.2}" y="{ly:.2}" text-anchor="end">{hi}</text>
"#,
        ly = zero + 14.0,
        rx = WIDTH - MARGIN_RIGHT,
        lo = format_tick(first.start),
        hi = format_tick(last.end),
    ));
    s.push_str("</svg>");
    s
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo == hi { (lo - 1.0, hi + 1.0) } else { (lo, hi) }
}

pub fn scatter_chart(scatter: &Scatter, x_label: &str, y_label: &str) -> String {
    if scatter.points.is_empty() {
        return no_data(NO_DATA);
    }
    let (x_min, x_max) = padded_range(scatter.points.iter().map(|(x, _)| *x));
    let (y_min, y_max) = padded_range(scatter.points.iter().map(|(_, y)| *y));

    let mut s = svg_open();
    s.push_str(&axes(x_label, y_label, y_min, y_max));
    for (x, y) in &scatter.points {
        s.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="3" fill="{}" fill-opacity="0.7"><title>({}, {})</title></circle>
"#,
            scale_x(*x, x_min, x_max),
            scale_y(*y, y_min, y_max),
            PALETTE[0],
            format_tick(*x),
            format_tick(*y),
        ));
    }
    if let Some(trend) = &scatter.trend {
        // clip to the plot area vertically
        let y_at = |x: f64| trend.predict(x).clamp(y_min, y_max);
        s.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="2"><title>OLS trendline: y = {:.4} * x + {:.4}</title></line>
"#,
            scale_x(x_min, x_min, x_max),
            scale_y(y_at(x_min), y_min, y_max),
            scale_x(x_max, x_min, x_max),
            scale_y(y_at(x_max), y_min, y_max),
            PALETTE[1],
            trend.slope,
            trend.intercept,
        ));
    }
    s.push_str(&format!(
        r#"<text x="{MARGIN_LEFT}" y="{ly:.2}" text-anchor="start">{lo}</text>
<text x="{rx:.2}" y="{ly:.2}" text-anchor="end">{hi}</text>
"#,
        ly = MARGIN_TOP + plot_height() + 14.0,
        rx = WIDTH - MARGIN_RIGHT,
        lo = format_tick(x_min),
        hi = format_tick(x_max),
    ));
    s.push_str("</svg>");
    if let Some(trend) = &scatter.trend {
        s.push_str(&format!(
            "<p>Trend: y = {:.4} &times; x + {:.4}{}</p>",
            trend.slope,
            trend.intercept,
            trend
                .r_squared
                .map_or_else(String::new, |r2| format!(", R&sup2; = {:.4}", r2)),
        ));
    }
    s
}

pub fn line_chart(items: &[(String, f64)], x_label: &str, y_label: &str) -> String {
    if items.is_empty() {
        return no_data(NO_DATA);
    }
    let (y_min, y_max) = y_range(items.iter().map(|(_, v)| *v));
    let slot = plot_width() / items.len() as f64;
    let point = |i: usize, v: f64| {
        (
            MARGIN_LEFT + slot * i as f64 + slot / 2.0,
            scale_y(v, y_min, y_max),
        )
    };

    let mut s = svg_open();
    s.push_str(&axes(x_label, y_label, y_min, y_max));
    let path: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, (_, v))| {
            let (x, y) = point(i, *v);
            format!("{:.2},{:.2}", x, y)
        })
        .collect();
    s.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>
"#,
        path.join(" "),
        PALETTE[0]
    ));
    for (i, (label, value)) in items.iter().enumerate() {
        let (x, y) = point(i, *value);
        s.push_str(&format!(
            r#"<circle cx="{x:.2}" cy="{y:.2}" r="3" fill="{fill}"><title>{label}: {v}</title></circle>
<text x="{x:.2}" y="{ly:.2}" text-anchor="middle">{short}</text>
"#,
            fill = PALETTE[0],
            label = escape_html(label),
            v = format_tick(*value),
            ly = MARGIN_TOP + plot_height() + 14.0,
            short = escape_html(&truncate(label, (slot / 7.0) as usize)),
        ));
    }
    s.push_str("</svg>");
    s
}

pub fn pie_chart(items: &[(String, f64)]) -> String {
    let total: f64 = items.iter().map(|(_, v)| v).sum();
    if items.is_empty() || total <= 0.0 {
        return no_data(NO_DATA);
    }

    let (cx, cy, r) = (HEIGHT / 2.0, HEIGHT / 2.0, HEIGHT / 2.0 - 20.0);
    let mut s = svg_open();
    let mut angle = -std::f64::consts::FRAC_PI_2;

    for (i, (label, value)) in items.iter().enumerate() {
        let fill = PALETTE[i % PALETTE.len()];
        let share = value / total;
        let title = format!(
            "{}: {} ({:.1}%)",
            escape_html(label),
            format_tick(*value),
            share * 100.0
        );

        if share >= 1.0 {
            s.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"><title>{title}</title></circle>
"#
            ));
        } else if share > 0.0 {
            let end = angle + share * std::f64::consts::TAU;
            let large = if share > 0.5 { 1 } else { 0 };
            s.push_str(&format!(
                r##"<path d="M {cx} {cy} L {x1:.2} {y1:.2} A {r} {r} 0 {large} 1 {x2:.2} {y2:.2} Z" fill="{fill}" stroke="#fff"><title>{title}</title></path>
"##,
                x1 = cx + r * angle.cos(),
                y1 = cy + r * angle.sin(),
                x2 = cx + r * end.cos(),
                y2 = cy + r * end.sin(),
            ));
            angle = end;
        }

        let ly = MARGIN_TOP + 18.0 * i as f64;
        s.push_str(&format!(
            r#"<rect x="{lx}" y="{ry}" width="10" height="10" fill="{fill}"/>
<text x="{tx}" y="{ty}">{title}</text>
"#,
            lx = HEIGHT + 20.0,
            ry = ly,
            tx = HEIGHT + 36.0,
            ty = ly + 9.0,
        ));
    }
    s.push_str("</svg>");
    s
}

// ── Formatting helpers ──────────────────────────────────────────────────────

/// Two decimals with thousands separators, e.g. `1,234.50`.
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Rounds to two decimals and drops trailing zeros, e.g. `12.5`.
pub fn format_rounded(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn truncate(label: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(3);
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let mut s: String = label.chars().take(max_chars - 1).collect();
        s.push('…');
        s
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::read_trips;
    use crate::stats::LinearFit;
    use crate::structs::{TransformConfig, TripFilter};
    use crate::transform::build_dashboard;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(210.0), "210.00");
        assert_eq!(format_thousands(1234.5), "1,234.50");
        assert_eq!(format_thousands(1234567.891), "1,234,567.89");
        assert_eq!(format_thousands(0.0), "0.00");
        assert_eq!(format_thousands(-1000.0), "-1,000.00");
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(12.345), "12.35");
        assert_eq!(format_rounded(12.5), "12.5");
        assert_eq!(format_rounded(12.0), "12");
        assert_eq!(format_rounded(0.0), "0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_zero_fare_placeholder() {
        let html = zero_fare_table(&[]);
        assert!(html.contains("No trips with zero fare."));
    }

    #[test]
    fn test_zero_fare_table_lists_rows() {
        let row = TripRow {
            row_index: 3,
            city: Some("Pune".to_string()),
            product_type: Some("Auto".to_string()),
            fare_amount: Some(0.0),
            distance: Some(1.2),
            request_time: Some("2024-01-01 08:00:00".to_string()),
            begin_trip_time: None,
            dropoff_time: None,
        };
        let html = zero_fare_table(&[row]);
        assert!(html.contains("<td>Pune</td>"));
        assert!(html.contains("<td>2024-01-01 08:00:00</td>"));
        assert!(!html.contains(NO_ZERO_FARE));
    }

    #[test]
    fn test_empty_charts_render_placeholder() {
        assert!(bar_chart(&[], "x", "y").contains(NO_DATA));
        assert!(line_chart(&[], "x", "y").contains(NO_DATA));
        assert!(pie_chart(&[]).contains(NO_DATA));
        assert!(stacked_bar_chart(&[], "x", "y").contains(NO_DATA));
        assert!(histogram_chart(&[], "x", "y").contains(NO_DATA));
        let scatter = Scatter {
            points: Vec::new(),
            trend: None,
        };
        assert!(scatter_chart(&scatter, "x", "y").contains(NO_DATA));
        assert!(longest_city_text(None).contains(NO_DATA));
        assert!(peak_text(None, None).contains(NO_DATA));
    }

    fn section_of<'a>(html: &'a str, title: &str) -> &'a str {
        let start = html
            .find(&format!("<h2>{}</h2>", title))
            .expect("section present");
        let end = html[start..].find("</section>").expect("section closed");
        &html[start..start + end]
    }

    fn dashboard_for(data: &str, city: &str) -> Dashboard {
        let loaded = read_trips(data.as_bytes()).unwrap();
        let filter = TripFilter {
            city: Selector::Value(city.to_string()),
            product_type: Selector::All,
        };
        build_dashboard(loaded, &filter, &TransformConfig::default())
    }

    const TWO_CITIES: &str = "request_time,begin_trip_time,dropoff_time,city,product_type,distance,fare_amount,status\n\
        2024-01-05 08:00:00,2024-01-05 08:05:00,2024-01-05 08:20:00,A,UberX,3,10,COMPLETED\n\
        ,2024-01-06 09:05:00,2024-01-06 09:20:00,B,UberX,5,20,COMPLETED\n";

    #[test]
    fn test_empty_filtered_set_renders_placeholders() {
        let html = render_html(&dashboard_for(TWO_CITIES, "Nowhere"));
        for title in [
            "Trip Status Distribution",
            "Trips in Different Hour Ranges",
            "Trip Count per City",
            "Trip Count per Hour",
            "Trips per Day of the Week",
            "Monthly Trip Trends",
        ] {
            let content = section_of(&html, title);
            assert!(content.contains(NO_DATA), "{} should be empty", title);
            assert!(!content.contains("<svg"), "{} drew a chart", title);
        }
    }

    #[test]
    fn test_all_missing_request_time_renders_placeholders() {
        let html = render_html(&dashboard_for(TWO_CITIES, "B"));
        for title in [
            "Trips in Different Hour Ranges",
            "Trip Count per Hour",
            "Trips per Day of the Week",
            "Monthly Trip Trends",
        ] {
            let content = section_of(&html, title);
            assert!(content.contains(NO_DATA), "{} should be empty", title);
            assert!(!content.contains("<svg"), "{} drew a chart", title);
        }
        // other columns of the same trip are still charted
        assert!(section_of(&html, "Trip Count per City").contains("<svg"));
    }

    #[test]
    fn test_missing_group_next_to_observed_values_is_drawn() {
        let counts = vec![
            CategoryCount {
                category: "Morning (6-12)".to_string(),
                count: 2,
            },
            CategoryCount {
                category: MISSING_LABEL.to_string(),
                count: 1,
            },
        ];
        assert_eq!(counts_as_values(&counts).len(), 2);
        assert!(counts_as_values(&counts[1..]).is_empty());
    }

    #[test]
    fn test_charts_render_svg() {
        let items = vec![("A".to_string(), 3.0), ("B".to_string(), 1.0)];
        assert_eq!(bar_chart(&items, "x", "y").matches("<rect").count(), 2);
        assert_eq!(pie_chart(&items).matches("<path").count(), 2);
        assert!(line_chart(&items, "x", "y").contains("<polyline"));

        let scatter = Scatter {
            points: vec![(1.0, 2.0), (2.0, 4.0)],
            trend: Some(LinearFit {
                slope: 2.0,
                intercept: 0.0,
                r_squared: Some(1.0),
            }),
        };
        let html = scatter_chart(&scatter, "x", "y");
        assert_eq!(html.matches("<circle").count(), 2);
        assert!(html.contains("OLS trendline"));
    }

    #[test]
    fn test_single_slice_pie_is_full_circle() {
        let html = pie_chart(&[("COMPLETED".to_string(), 4.0)]);
        assert!(html.contains("<circle"));
        assert!(html.contains("100.0%"));
    }

    #[test]
    fn test_peak_text() {
        let html = peak_text(Some(8), Some("Friday"));
        assert!(html.contains("Most frequent travel hour: <b>8:00</b>"));
        assert!(html.contains("Most frequent travel day: <b>Friday</b>"));
    }

    #[test]
    fn test_longest_city_sentence() {
        let city = GroupMean {
            group: "Mumbai".to_string(),
            mean: Some(12.0),
        };
        assert!(longest_city_text(Some(&city)).contains(
            "The city with the longest average distance is Mumbai with an average of 12 km."
        ));
    }
}
