//! Ease-out count-up from 0 to the fetched value.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};

use super::DisplaySurface;

/// Roughly one frame at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Value to show `elapsed` into an animation of length `duration`.
pub fn frame_value(target: u64, elapsed: Duration, duration: Duration) -> u64 {
    if duration.is_zero() || elapsed >= duration {
        return target;
    }
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    ((target as f64 * ease_out_cubic(t)).floor() as u64).min(target)
}

/// Drive the surface from 0 to `target`, one update per frame tick. Only
/// changed values are written; the last write is always `target`.
pub async fn animate_count<S>(surface: &mut S, target: u64, duration: Duration)
where
    S: DisplaySurface + ?Sized,
{
    let start = Instant::now();
    let mut frames = time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut shown = None;
    loop {
        frames.tick().await;
        let elapsed = start.elapsed();
        let v = frame_value(target, elapsed, duration);
        if shown != Some(v) {
            surface.set_text(&v.to_string());
            shown = Some(v);
        }
        if elapsed >= duration {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_endpoints_and_shape() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        // ease-out: ahead of linear in the first half
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn frame_value_bounds() {
        let d = Duration::from_millis(1000);
        assert_eq!(frame_value(100, Duration::ZERO, d), 0);
        assert_eq!(frame_value(100, Duration::from_millis(500), d), 87);
        assert_eq!(frame_value(100, d, d), 100);
        assert_eq!(frame_value(100, Duration::from_secs(5), d), 100);
        assert_eq!(frame_value(7, Duration::ZERO, Duration::ZERO), 7);
    }
}
