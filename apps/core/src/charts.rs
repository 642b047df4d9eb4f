//! Renderer-agnostic chart specifications built from a ranked subject.
//!
//! Every adapter is a pure function of a [`SubjectRecord`]; nothing here
//! sorts, the order is whatever the ranking produced.

use crate::index::SubjectRecord;
use serde::Serialize;

/// How many OTUs the bar chart shows.
pub const BAR_LIMIT: usize = 10;
pub const GAUGE_TITLE: &str = "Washing Frequency (scrubs/week)";
pub const GAUGE_RANGE: [f64; 2] = [0.0, 9.0];

/// Shown in place of a `null` demographic value.
pub const MISSING_VALUE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
}

/// Horizontal bars for the top OTUs of one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub title: String,
    /// `"OTU <id>"`, rank 0 first
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub hover_text: Vec<String>,
    pub orientation: Orientation,
    /// Explicit category axis order. Renderers draw categories in this order
    /// and never apply their own sort.
    pub tick_order: Vec<String>,
    pub value_axis_title: String,
}

impl BarSpec {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Colorscale {
    Portland,
}

impl Colorscale {
    const PORTLAND: [(f64, (u8, u8, u8)); 5] = [
        (0.0, (12, 51, 131)),
        (0.25, (10, 136, 186)),
        (0.5, (242, 211, 56)),
        (0.75, (242, 143, 56)),
        (1.0, (217, 30, 30)),
    ];

    pub const fn stops(self) -> &'static [(f64, (u8, u8, u8))] {
        match self {
            Self::Portland => &Self::PORTLAND,
        }
    }

    /// Linear interpolation between stops, `t` clamped to `[0, 1]`.
    pub fn sample(self, t: f64) -> (u8, u8, u8) {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        for pair in stops.windows(2) {
            let (start, low) = pair[0];
            let (end, high) = pair[1];
            if t <= end {
                let local = if end > start { (t - start) / (end - start) } else { 0.0 };
                return (
                    lerp(low.0, high.0, local),
                    lerp(low.1, high.1, local),
                    lerp(low.2, high.2, local),
                );
            }
        }

        stops.last().map_or((0, 0, 0), |&(_, rgb)| rgb)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (f64::from(to) - f64::from(from))
        .mul_add(t, f64::from(from))
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Every OTU of one subject, marker colour and size driven by abundance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleSpec {
    pub title: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub hover_text: Vec<String>,
    pub marker_color: Vec<f64>,
    pub marker_size: Vec<f64>,
    pub colorscale: Colorscale,
    pub x_axis_title: String,
    pub y_axis_title: String,
}

impl BubbleSpec {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Marker `k`'s colour value scaled to `[0, 1]` between the smallest and
    /// largest colour value of this chart.
    pub fn color_fraction(&self, k: usize) -> Option<f64> {
        let value = *self.marker_color.get(k)?;
        let (min, max) = self
            .marker_color
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        Some(if max > min { (value - min) / (max - min) } else { 0.0 })
    }

    pub fn marker_rgb(&self, k: usize) -> Option<(u8, u8, u8)> {
        self.color_fraction(k).map(|t| self.colorscale.sample(t))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSpec {
    pub title: String,
    pub value: Option<f64>,
    pub range: [f64; 2],
    pub show_number: bool,
}

impl GaugeSpec {
    /// Position of the needle within the range, `None` without a value.
    pub fn fraction(&self) -> Option<f64> {
        let [low, high] = self.range;
        let value = self.value?;
        if high <= low {
            return Some(0.0);
        }
        Some(((value - low) / (high - low)).clamp(0.0, 1.0))
    }
}

/// Seven `key: value` lines for the sample metadata panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicPanel {
    pub lines: Vec<String>,
}

pub const PANEL_FIELDS: [&str; 7] = [
    "id",
    "ethnicity",
    "gender",
    "age",
    "location",
    "bbtype",
    "wfreq",
];

pub fn bar_spec(subject: &SubjectRecord) -> BarSpec {
    let mut categories = Vec::with_capacity(BAR_LIMIT);
    let mut values = Vec::with_capacity(BAR_LIMIT);
    let mut hover_text = Vec::with_capacity(BAR_LIMIT);

    for (id, value, label) in subject.samples.iter().take(BAR_LIMIT) {
        categories.push(format!("OTU {id}"));
        values.push(value);
        hover_text.push(label.to_string());
    }

    BarSpec {
        title: format!("Top 10 OTUs of individual {}", subject.metadata.id),
        tick_order: categories.clone(),
        categories,
        values,
        hover_text,
        orientation: Orientation::Horizontal,
        value_axis_title: "Count".to_string(),
    }
}

pub fn bubble_spec(subject: &SubjectRecord) -> BubbleSpec {
    let ranked = &subject.samples;

    BubbleSpec {
        title: format!("OTUs present in individual {}", subject.metadata.id),
        x: ranked.otu_ids.clone(),
        y: ranked.sample_values.clone(),
        hover_text: ranked.otu_labels.clone(),
        marker_color: ranked.sample_values.clone(),
        marker_size: ranked.sample_values.clone(),
        colorscale: Colorscale::Portland,
        x_axis_title: "OTU".to_string(),
        y_axis_title: "Count".to_string(),
    }
}

pub fn gauge_spec(subject: &SubjectRecord) -> GaugeSpec {
    GaugeSpec {
        title: GAUGE_TITLE.to_string(),
        value: subject.metadata.wfreq,
        range: GAUGE_RANGE,
        show_number: true,
    }
}

pub fn demographic_panel(subject: &SubjectRecord) -> DemographicPanel {
    let demo = &subject.metadata;
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING_VALUE.to_string());
    let number = |value: Option<f64>| value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string());

    let values = [
        demo.id.to_string(),
        text(&demo.ethnicity),
        text(&demo.gender),
        number(demo.age),
        text(&demo.location),
        text(&demo.bbtype),
        number(demo.wfreq),
    ];

    DemographicPanel {
        lines: PANEL_FIELDS
            .iter()
            .zip(values)
            .map(|(key, value)| format!("{key}: {value}"))
            .collect(),
    }
}
