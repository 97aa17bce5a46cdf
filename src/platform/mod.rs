//! Platform helpers
//!
//! Handles browser/native differences for:
//! - Time (performance.now on web)
//! - Button press debouncing (mouse + touch fire for the same tap)

use crate::consts::BUTTON_DEBOUNCE_MS;

/// Drops repeat triggers that arrive too soon after an accepted one
#[derive(Debug, Clone)]
pub struct Debounce {
    window_ms: f64,
    last_accepted: Option<f64>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(BUTTON_DEBOUNCE_MS)
    }
}

impl Debounce {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Whether a trigger at `now_ms` should run
    pub fn accept(&mut self, now_ms: f64) -> bool {
        match self.last_accepted {
            Some(last) if now_ms - last < self.window_ms && now_ms >= last => false,
            _ => {
                self.last_accepted = Some(now_ms);
                true
            }
        }
    }
}

/// Milliseconds from the page's monotonic clock
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_window() {
        let mut debounce = Debounce::default();
        assert!(debounce.accept(1000.0));
        assert!(!debounce.accept(1100.0));
        assert!(!debounce.accept(1299.0));
        assert!(debounce.accept(1300.0));
        assert!(!debounce.accept(1400.0));
    }

    #[test]
    fn test_clock_going_backwards_is_accepted() {
        let mut debounce = Debounce::new(300.0);
        assert!(debounce.accept(5000.0));
        assert!(debounce.accept(10.0));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_clock_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
