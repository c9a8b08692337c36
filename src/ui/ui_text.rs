/// Every user-visible string, in one place.
pub struct UiText {
    pub window_title: &'static str,
    pub header_title: &'static str,
    pub header_subtitle: &'static str,

    // Market panel
    pub loading_market: &'static str,
    pub error_prefix: &'static str,
    pub incomplete_data: &'static str,
    pub market_cap_prefix: &'static str,

    // Chart panel
    pub loading_chart: &'static str,
    pub chart_unavailable: &'static str,
    pub chart_title_prefix: &'static str,
    pub plot_y_axis: &'static str,

    // Status bar
    pub status_market: &'static str,
    pub status_chart: &'static str,
    pub status_never: &'static str,
    pub status_refreshing: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Crypto Dashboard",
    header_title: "Crypto Dashboard",
    header_subtitle: "Live prices and market data for top cryptocurrencies.",

    loading_market: "Loading market data...",
    error_prefix: "Error: ",
    incomplete_data: "Could not find all cryptocurrency data.",
    market_cap_prefix: "Market Cap: $",

    loading_chart: "Loading chart data...",
    chart_unavailable: "Could not load chart data.",
    chart_title_prefix: "Bitcoin Price",
    plot_y_axis: "USD",

    status_market: "Markets",
    status_chart: "Chart",
    status_never: "waiting",
    status_refreshing: "refreshing",
};
