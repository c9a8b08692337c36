use eframe::egui;
use egui_plot::{AxisHints, GridMark, HPlacement, Line, Plot, PlotPoints};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::ChartSeries;
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::format_axis_price;
use crate::utils::time_utils::epoch_ms_to_local_month_day;

/// Plot-ready copy of a series, rebuilt only when the series changes.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotCache {
    pub points: Vec<[f64; 2]>,
    pub y_min: f64,
    pub y_max: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl PlotCache {
    pub fn from_series(series: &ChartSeries) -> Option<Self> {
        let (lo, hi) = series.price_range()?;
        let (first, last) = series.time_range()?;

        // Flat series still get a visible band
        let span = if hi > lo { hi - lo } else { hi.abs().max(1.0) };
        let pad = span * PLOT_CONFIG.y_padding_pct;

        Some(Self {
            points: series
                .points
                .iter()
                .map(|p| [p.timestamp_ms as f64, p.price])
                .collect(),
            y_min: lo - pad,
            y_max: hi + pad,
            x_min: first as f64,
            x_max: last as f64,
        })
    }
}

#[derive(Default)]
pub struct PlotView {
    cache: Option<(ChartSeries, PlotCache)>,
}

impl PlotView {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    fn plot_data(&mut self, series: &ChartSeries) -> Option<PlotCache> {
        if let Some((cached_series, cache)) = &self.cache {
            if cached_series == series {
                return Some(cache.clone());
            }
        }
        let cache = PlotCache::from_series(series)?;
        self.cache = Some((series.clone(), cache.clone()));
        Some(cache)
    }

    pub fn show_price_chart(&mut self, ui: &mut egui::Ui, series: &ChartSeries) {
        let Some(cache) = self.plot_data(series) else {
            // Empty series: axes only
            ui.allocate_space(egui::vec2(ui.available_width(), PLOT_CONFIG.chart_height));
            return;
        };

        let x_span = (cache.x_max - cache.x_min).max(1.0);
        let x_min = cache.x_min;

        Plot::new("price_chart")
            .height(PLOT_CONFIG.chart_height)
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis()])
            .label_formatter(|_, value| {
                format!(
                    "{}\n{}",
                    epoch_ms_to_local_month_day(value.x as i64),
                    format_axis_price(value.y)
                )
            })
            .x_grid_spacer(move |_input| {
                let divisions = PLOT_CONFIG.x_axis_divisions.max(1);
                let step = x_span / divisions as f64;
                (0..=divisions)
                    .map(|i| GridMark {
                        value: x_min + step * i as f64,
                        step_size: step,
                    })
                    .collect()
            })
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(cache.x_min..=cache.x_max);
                plot_ui.set_plot_bounds_y(cache.y_min..=cache.y_max);

                let line = Line::new(UI_TEXT.chart_title_prefix, PlotPoints::from(cache.points))
                    .color(PLOT_CONFIG.price_line_color)
                    .width(PLOT_CONFIG.price_line_width)
                    .fill(cache.y_min as f32);
                plot_ui.line(line);
            });
    }
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .formatter(|grid_mark, _range| epoch_ms_to_local_month_day(grid_mark.value as i64))
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_y_axis)
        .formatter(|grid_mark, _range| format_axis_price(grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, SeriesKey, Timeframe};

    fn series(points: &[(i64, f64)]) -> ChartSeries {
        ChartSeries::new(
            SeriesKey::new("bitcoin", Timeframe::SevenDays),
            points
                .iter()
                .map(|&(timestamp_ms, price)| PricePoint {
                    timestamp_ms,
                    price,
                })
                .collect(),
        )
    }

    #[test]
    fn cache_spans_series_with_padding() {
        let cache = PlotCache::from_series(&series(&[(2_000, 110.0), (1_000, 100.0)]))
            .expect("non-empty");
        assert_eq!(cache.points, vec![[1_000.0, 100.0], [2_000.0, 110.0]]);
        assert_eq!((cache.x_min, cache.x_max), (1_000.0, 2_000.0));
        assert!(cache.y_min < 100.0 && cache.y_max > 110.0);
    }

    #[test]
    fn empty_series_has_no_plot_data() {
        assert!(PlotCache::from_series(&series(&[])).is_none());
    }

    #[test]
    fn flat_series_gets_a_band() {
        let cache = PlotCache::from_series(&series(&[(0, 50.0), (1, 50.0)])).expect("non-empty");
        assert!(cache.y_max > cache.y_min);
    }
}
