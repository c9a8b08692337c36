//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every use is further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit a line for every request issued by either refresh loop.
    pub print_fetch_events: bool,
    /// Emit a line when a late response is discarded by the stale guard.
    pub print_stale_discards: bool,
    /// Emit series cache evictions.
    pub print_cache_events: bool,
    /// Emit UI interaction logs (e.g., timeframe switching).
    pub print_ui_interactions: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch_events: false,
    print_stale_discards: true,
    print_cache_events: false,
    print_ui_interactions: true,
    print_shutdown: false,
};
