use crate::core::{Sample, SeriesSnapshot, Telemetry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How far the visible window reaches around the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotWindow {
    /// Visible history behind the newest timestamp
    pub x_span: i64,
    /// Room ahead of the newest timestamp
    pub x_lead: i64,
    /// Padding above the max and below the min value
    pub y_margin: i64,
    /// Lowest allowed left edge, if any
    pub x_floor: Option<i64>,
}

impl Default for PlotWindow {
    fn default() -> Self {
        Self {
            x_span: 50,
            x_lead: 1,
            y_margin: 10,
            x_floor: None,
        }
    }
}

/// Closed axis interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Bounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn as_f64(&self) -> [f64; 2] {
        [self.min as f64, self.max as f64]
    }
}

/// Horizontal window trailing the newest timestamp; `None` when empty
pub fn x_bounds(times: &[i64], window: &PlotWindow) -> Option<Bounds> {
    let last = *times.last()?;
    let mut left = last.saturating_sub(window.x_span);
    if let Some(floor) = window.x_floor {
        left = left.max(floor);
    }
    Some(Bounds::new(left, last.saturating_add(window.x_lead)))
}

/// Vertical window around the value range; `None` when empty
pub fn y_bounds(values: &[i64], window: &PlotWindow) -> Option<Bounds> {
    let min = values.iter().copied().min()?;
    let max = values.iter().copied().max()?;
    Some(Bounds::new(
        min.saturating_sub(window.y_margin),
        max.saturating_add(window.y_margin),
    ))
}

/// What the display needs for one redraw
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    /// Shared, not copied, between ticks that see no new data
    pub series: Arc<SeriesSnapshot>,
    pub x_bounds: Option<Bounds>,
    pub y_bounds: Option<Bounds>,
}

impl PlotFrame {
    pub fn summary(&self) -> PlotSummary {
        PlotSummary {
            generation: self.series.generation,
            samples: self.series.len(),
            last: self.series.last(),
            x_bounds: self.x_bounds,
            y_bounds: self.y_bounds,
        }
    }
}

/// Compact, serializable view of a [`PlotFrame`] for logs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSummary {
    pub generation: u64,
    pub samples: usize,
    pub last: Option<Sample>,
    pub x_bounds: Option<Bounds>,
    pub y_bounds: Option<Bounds>,
}

/// Called once per display tick; hands over the current series and the
/// window to show it in.
///
/// An empty series leaves the previous bounds in place, so the display
/// keeps its last window instead of jumping.
pub struct PlotFeed {
    telemetry: Arc<Telemetry>,
    window: PlotWindow,
    current: Arc<SeriesSnapshot>,
    x_bounds: Option<Bounds>,
    y_bounds: Option<Bounds>,
}

impl PlotFeed {
    pub fn new(telemetry: Arc<Telemetry>, window: PlotWindow) -> Self {
        Self {
            telemetry,
            window,
            current: Arc::new(SeriesSnapshot::default()),
            x_bounds: None,
            y_bounds: None,
        }
    }

    pub fn window(&self) -> &PlotWindow {
        &self.window
    }

    pub fn telemetry(&self) -> &Arc<Telemetry> {
        &self.telemetry
    }

    pub fn tick(&mut self) -> PlotFrame {
        if let Some(snapshot) = self.telemetry.snapshot_if_changed(self.current.generation) {
            self.current = Arc::new(snapshot);
        }

        if let Some(x) = x_bounds(&self.current.times, &self.window) {
            self.x_bounds = Some(x);
        }
        if let Some(y) = y_bounds(&self.current.values, &self.window) {
            self.y_bounds = Some(y);
        }

        PlotFrame {
            series: self.current.clone(),
            x_bounds: self.x_bounds,
            y_bounds: self.y_bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_clamps_left_edge() {
        let window = PlotWindow {
            x_floor: Some(0),
            ..Default::default()
        };
        assert_eq!(x_bounds(&[10], &window), Some(Bounds::new(0, 11)));
        assert_eq!(x_bounds(&[10], &PlotWindow::default()), Some(Bounds::new(-40, 11)));
    }

    #[test]
    fn test_single_value_range() {
        assert_eq!(
            y_bounds(&[5], &PlotWindow::default()),
            Some(Bounds::new(-5, 15))
        );
    }
}
