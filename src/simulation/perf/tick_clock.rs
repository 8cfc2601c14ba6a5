use super::tick_stats::TickStats;

/// Milliseconds on a monotonic-ish clock. Only differences are meaningful.
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Wall time of one tick, stored into [`TickStats`] when the tick ends
pub(super) struct TickClock {
    started_ms: f64,
}

impl TickClock {
    pub(super) fn begin() -> Self {
        Self { started_ms: now_ms() }
    }

    /// `Date.now()` can step backwards on a clock change; that tick reads 0
    pub(super) fn finish(self, stats: &mut TickStats) {
        stats.tick_ms = (now_ms() - self.started_ms).max(0.0);
    }
}
