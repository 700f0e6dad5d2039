#![forbid(unsafe_code)]

//! Frame-stepped animation primitives.
//!
//! Page animations are driven by a fixed-rate timer, one step per timer tick,
//! so progress is counted in frames rather than accumulated wall time. A
//! [`FrameTween`] maps its frame counter through an easing function to a
//! normalized value in `[0, 1]`.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quartic ease-out: `1 - (1 - t)^4`. Fast start, long gentle landing.
#[inline]
#[must_use]
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Number of frames a `duration` spans at `fps` frames per second, rounded to
/// the nearest whole frame and never less than one.
#[must_use]
pub fn frames_for(duration: Duration, fps: u32) -> u32 {
    let period_ms = 1000.0 / f64::from(fps.max(1));
    let frames = (duration.as_secs_f64() * 1000.0 / period_ms).round();
    if frames < 1.0 {
        1
    } else if frames > f64::from(u32::MAX) {
        u32::MAX
    } else {
        frames as u32
    }
}

/// Period of one frame at `fps` frames per second.
#[must_use]
pub fn frame_period(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}

// ---------------------------------------------------------------------------
// FrameTween
// ---------------------------------------------------------------------------

/// Progression from frame 0 to `total_frames`, one [`advance`](Self::advance)
/// per timer tick.
///
/// The final frame reports exactly `1.0`, and [`interpolate`](Self::interpolate)
/// returns the target itself on that frame, so callers never see a value
/// that stops short of the target.
#[derive(Debug, Clone, Copy)]
pub struct FrameTween {
    frame: u32,
    total_frames: u32,
    easing: EasingFn,
}

impl FrameTween {
    /// Tween over `total_frames` frames with linear easing.
    #[must_use]
    pub fn new(total_frames: u32) -> Self {
        Self {
            frame: 0,
            total_frames: total_frames.max(1),
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Step one frame. Returns `true` once the final frame has been reached.
    pub fn advance(&mut self) -> bool {
        if self.frame < self.total_frames {
            self.frame += 1;
        }
        self.is_complete()
    }

    /// Frames stepped so far.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Frame count at completion.
    #[inline]
    #[must_use]
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Whether the final frame has been reached.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.frame >= self.total_frames
    }

    /// Whether at least one frame has been stepped.
    #[inline]
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.frame > 0
    }

    /// Linear progress `frame / total_frames`.
    #[must_use]
    pub fn raw_progress(&self) -> f64 {
        f64::from(self.frame) / f64::from(self.total_frames)
    }

    /// Eased progress.
    #[must_use]
    pub fn value(&self) -> f64 {
        (self.easing)(self.raw_progress())
    }

    /// `target` scaled by eased progress; exactly `target` on the final frame.
    #[must_use]
    pub fn interpolate(&self, target: f64) -> f64 {
        if self.is_complete() {
            target
        } else {
            target * self.value()
        }
    }

    /// Rewind to frame 0.
    pub fn reset(&mut self) {
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quart_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn quart_is_ahead_of_linear() {
        for i in 1..10 {
            let t = f64::from(i) / 10.0;
            assert!(ease_out_quart(t) > linear(t));
        }
    }

    #[test]
    fn easing_clamps_input() {
        assert_eq!(linear(-1.0), 0.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
    }

    #[test]
    fn two_seconds_at_sixty_fps_is_120_frames() {
        assert_eq!(frames_for(Duration::from_millis(2000), 60), 120);
        assert_eq!(frames_for(Duration::ZERO, 60), 1);
    }

    #[test]
    fn frame_period_at_sixty_fps() {
        let p = frame_period(60);
        assert!(p > Duration::from_micros(16_666) && p < Duration::from_micros(16_668));
    }

    #[test]
    fn tween_completes_after_total_frames() {
        let mut tw = FrameTween::new(3);
        assert!(!tw.has_started());
        assert!(!tw.advance());
        assert!(!tw.advance());
        assert!(tw.advance());
        assert!(tw.is_complete());
        // Further advances are harmless.
        assert!(tw.advance());
        assert_eq!(tw.frame(), 3);
    }

    #[test]
    fn interpolate_snaps_to_target() {
        let mut tw = FrameTween::new(120).easing(ease_out_quart);
        while !tw.advance() {}
        assert_eq!(tw.interpolate(1234.5), 1234.5);
    }

    #[test]
    fn interpolate_midway_is_eased() {
        let mut tw = FrameTween::new(4).easing(ease_out_quart);
        tw.advance();
        tw.advance();
        assert!((tw.interpolate(100.0) - 93.75).abs() < 1e-9);
    }

    #[test]
    fn zero_frames_clamped_to_one() {
        let mut tw = FrameTween::new(0);
        assert_eq!(tw.total_frames(), 1);
        assert!(tw.advance());
    }

    #[test]
    fn reset_rewinds() {
        let mut tw = FrameTween::new(2);
        tw.advance();
        tw.reset();
        assert_eq!(tw.frame(), 0);
        assert_eq!(tw.value(), 0.0);
    }
}
