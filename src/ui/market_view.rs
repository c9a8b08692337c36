//! Presentation model: turns fetcher views into exactly what each panel shows.
//!
//! Kept free of egui so the rendering decisions can be tested directly.

use crate::domain::{AssetSnapshot, ChartSeries, Timeframe, TrackedAssets};
use crate::engine::QueryView;
use crate::ui::config::UI_TEXT;
use crate::ui::utils::{change_indicator, format_change_pct, format_market_cap, format_usd_price};

/// Text of one asset card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardText {
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub indicator: &'static str,
    pub change: String,
    pub change_positive: bool,
    pub market_cap: String,
}

impl CardText {
    pub fn from_snapshot(snapshot: &AssetSnapshot) -> Self {
        let change = snapshot.price_change_percentage_24h;
        Self {
            name: snapshot.name.clone(),
            symbol: snapshot.symbol.to_uppercase(),
            price: format_usd_price(snapshot.current_price),
            indicator: change_indicator(change),
            change: format_change_pct(change),
            change_positive: change >= 0.0,
            market_cap: format!(
                "{}{}",
                UI_TEXT.market_cap_prefix,
                format_market_cap(snapshot.market_cap)
            ),
        }
    }
}

/// What the market area shows this frame. Exactly one case applies.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketPanel {
    Loading,
    /// Full "Error: ..." line
    Failed(String),
    /// Response arrived but a tracked id was missing
    Incomplete,
    Ready([CardText; 3]),
}

impl MarketPanel {
    pub fn from_view(view: &QueryView<'_, Vec<AssetSnapshot>>, ids: &[&str; 3]) -> Self {
        if view.is_loading {
            return MarketPanel::Loading;
        }
        if let Some(error) = view.error {
            return MarketPanel::Failed(format!("{}{}", UI_TEXT.error_prefix, error));
        }
        let Some(snapshots) = view.data else {
            return MarketPanel::Loading;
        };

        match TrackedAssets::locate(snapshots, ids) {
            Ok(tracked) => MarketPanel::Ready(tracked.cards.map(CardText::from_snapshot)),
            Err(_) => MarketPanel::Incomplete,
        }
    }

    /// Whether the chart should be drawn below. Only a ready market area
    /// is followed by the chart.
    pub fn shows_chart(&self) -> bool {
        matches!(self, MarketPanel::Ready(_))
    }
}

/// What the chart body shows this frame. The title and timeframe buttons
/// are drawn in every case.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody<'a> {
    Loading,
    Unavailable,
    Series(&'a ChartSeries),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel<'a> {
    pub title: String,
    pub selected: Timeframe,
    pub body: ChartBody<'a>,
}

impl<'a> ChartPanel<'a> {
    /// Any series on hand is drawn, even next to a failed refresh. The
    /// unavailable message only replaces the plot when there is nothing to show.
    pub fn from_view(view: &QueryView<'a, ChartSeries>, selected: Timeframe) -> Self {
        let body = match view.data {
            Some(series) => ChartBody::Series(series),
            None if view.is_loading => ChartBody::Loading,
            None => ChartBody::Unavailable,
        };
        Self {
            title: format!("{} ({})", UI_TEXT.chart_title_prefix, selected),
            selected,
            body,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.body {
            ChartBody::Loading => Some(UI_TEXT.loading_chart),
            ChartBody::Unavailable => Some(UI_TEXT.chart_unavailable),
            ChartBody::Series(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FetchError;
    use crate::domain::asset::tests::snapshot;
    use crate::domain::{PricePoint, SeriesKey};
    use crate::engine::RefreshState;

    const IDS: [&str; 3] = ["bitcoin", "ethereum", "dogecoin"];

    fn ready(snapshots: Vec<AssetSnapshot>) -> RefreshState<Vec<AssetSnapshot>> {
        RefreshState::Ready(snapshots)
    }

    #[test]
    fn bitcoin_card_renders_rounded_price_and_down_change() {
        let mut btc = snapshot("bitcoin", 65_000.1234);
        btc.price_change_percentage_24h = -3.456;
        btc.market_cap = 1_280_000_000_000.0;

        let card = CardText::from_snapshot(&btc);
        assert_eq!(card.price, "$65000.12");
        assert_eq!(card.change, "-3.46%");
        assert_eq!(card.indicator, "▼");
        assert!(!card.change_positive);
        assert_eq!(card.symbol, "BTC");
        assert_eq!(card.market_cap, "Market Cap: $1280.00B");
    }

    #[test]
    fn pending_state_shows_loading() {
        let state: RefreshState<Vec<AssetSnapshot>> = RefreshState::Pending;
        assert_eq!(
            MarketPanel::from_view(&state.view(true), &IDS),
            MarketPanel::Loading
        );
    }

    #[test]
    fn http_failure_shows_message_only() {
        let state: RefreshState<Vec<AssetSnapshot>> =
            RefreshState::Failed(FetchError::Http { status: 500 });
        let panel = MarketPanel::from_view(&state.view(false), &IDS);

        assert_eq!(
            panel,
            MarketPanel::Failed("Error: Network response was not ok".to_string())
        );
        assert!(!panel.shows_chart());
    }

    #[test]
    fn missing_dogecoin_is_incomplete() {
        let state = ready(vec![
            snapshot("bitcoin", 65_000.0),
            snapshot("ethereum", 3_000.0),
        ]);
        assert_eq!(
            MarketPanel::from_view(&state.view(false), &IDS),
            MarketPanel::Incomplete
        );
    }

    #[test]
    fn cards_follow_tracked_order_not_response_order() {
        let state = ready(vec![
            snapshot("dogecoin", 0.15),
            snapshot("bitcoin", 65_000.0),
            snapshot("ethereum", 3_000.0),
        ]);
        let MarketPanel::Ready(cards) = MarketPanel::from_view(&state.view(false), &IDS) else {
            panic!("expected ready panel");
        };
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Bitcoin", "Ethereum", "Dogecoin"]);
    }

    #[test]
    fn chart_title_uses_lowercase_timeframe() {
        let series = ChartSeries::new(
            SeriesKey::new("bitcoin", Timeframe::OneDay),
            vec![PricePoint {
                timestamp_ms: 0,
                price: 1.0,
            }],
        );
        let state = RefreshState::Ready(series.clone());
        let panel = ChartPanel::from_view(&state.view(false), Timeframe::OneDay);

        assert_eq!(panel.title, "Bitcoin Price (1d)");
        assert_eq!(panel.body, ChartBody::Series(&series));
        assert_eq!(panel.message(), None);
    }

    #[test]
    fn chart_failure_shows_unavailable() {
        let state: RefreshState<ChartSeries> =
            RefreshState::Failed(FetchError::Network("offline".into()));
        let panel = ChartPanel::from_view(&state.view(false), Timeframe::SevenDays);
        assert_eq!(panel.message(), Some("Could not load chart data."));
    }

    #[test]
    fn chart_keeps_series_when_refresh_failed() {
        let series = ChartSeries::new(
            SeriesKey::new("bitcoin", Timeframe::SevenDays),
            vec![PricePoint {
                timestamp_ms: 0,
                price: 2.0,
            }],
        );
        let error = FetchError::Http { status: 429 };
        let view = QueryView {
            data: Some(&series),
            is_loading: false,
            is_fetching: false,
            is_error: true,
            error: Some(&error),
        };

        let panel = ChartPanel::from_view(&view, Timeframe::SevenDays);
        assert_eq!(panel.body, ChartBody::Series(&series));
        assert_eq!(panel.message(), None);
    }

    #[test]
    fn chart_loading_message() {
        let state: RefreshState<ChartSeries> = RefreshState::Pending;
        let panel = ChartPanel::from_view(&state.view(true), Timeframe::SixHours);
        assert_eq!(panel.message(), Some("Loading chart data..."));
        assert_eq!(panel.title, "Bitcoin Price (6h)");
    }
}
