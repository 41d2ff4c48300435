//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Device pixel ratio
//! - Haptic feedback

use crate::consts::{MAX_DPR, MIN_DPR};

/// Clamp a reported device pixel ratio into the range the canvas supports
pub fn clamp_dpr(raw: f64) -> f32 {
    if !raw.is_finite() {
        return MIN_DPR;
    }
    (raw as f32).clamp(MIN_DPR, MAX_DPR)
}

/// `HH:MM:SS`
pub fn format_clock(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Haptic pulse lengths (ms)
pub const FLIP_PULSE_MS: u32 = 18;
pub const LAND_PULSE_MS: u32 = 28;
pub const TOGGLE_PULSE_MS: u32 = 20;

/// At most one pending timer handle (`setTimeout` / `setInterval`)
#[derive(Debug, Default)]
pub struct TimerSlot(Option<i32>);

impl TimerSlot {
    /// Store `handle` and hand back the previous one for cancelling
    pub fn replace(&mut self, handle: Option<i32>) -> Option<i32> {
        std::mem::replace(&mut self.0, handle)
    }

    pub fn take(&mut self) -> Option<i32> {
        self.0.take()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;

    /// Unix timestamp in milliseconds
    pub fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    /// Local wall-clock time for a timestamp
    pub fn local_clock(timestamp: f64) -> String {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp));
        format_clock(date.get_hours(), date.get_minutes(), date.get_seconds())
    }

    pub fn device_pixel_ratio() -> f32 {
        web_sys::window()
            .map(|w| clamp_dpr(w.device_pixel_ratio()))
            .unwrap_or(MIN_DPR)
    }

    /// Vibrate if the device supports it
    pub fn vibrate(ms: u32) {
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().vibrate_with_duration(ms);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;

    pub fn now_ms() -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    /// Local wall-clock time for a timestamp
    pub fn local_clock(timestamp: f64) -> String {
        chrono::DateTime::from_timestamp_millis(timestamp as i64)
            .map(|d| d.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| format_clock(0, 0, 0))
    }

    pub fn device_pixel_ratio() -> f32 {
        MIN_DPR
    }

    pub fn vibrate(_ms: u32) {
        // No haptics on native
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dpr() {
        assert_eq!(clamp_dpr(0.5), 1.0);
        assert_eq!(clamp_dpr(2.0), 2.0);
        assert_eq!(clamp_dpr(3.0), 2.2);
        assert_eq!(clamp_dpr(f64::NAN), 1.0);
    }

    #[test]
    fn test_timer_slot_hands_back_previous_handle() {
        let mut slot = TimerSlot::default();
        assert_eq!(slot.replace(Some(3)), None);
        // A newer timer must cancel the older one
        assert_eq!(slot.replace(Some(8)), Some(3));
        assert!(slot.is_set());
        assert_eq!(slot.take(), Some(8));
        assert!(!slot.is_set());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_format_clock_pads() {
        assert_eq!(format_clock(7, 5, 9), "07:05:09");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_clock_uses_local_offset() {
        use chrono::{DateTime, Local, Offset, TimeZone};

        // 1970-01-02 01:02:03 UTC
        let ts: i64 = (86_400 + 3_723) * 1000;
        let utc = DateTime::from_timestamp_millis(ts).unwrap();
        let offset = Local
            .offset_from_utc_datetime(&utc.naive_utc())
            .fix()
            .local_minus_utc();
        let secs = (3_723 + offset).rem_euclid(86_400) as u32;
        let expected = format_clock(secs / 3600, (secs % 3600) / 60, secs % 60);
        assert_eq!(local_clock(ts as f64), expected);
    }
}
