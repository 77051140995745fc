//! # Colormap
//!
//! Maps a scalar onto the "jet" ramp: blue, cyan, green, yellow, red.

/// Color of `value` within `[min, max]` on the jet ramp, as RGB in `[0, 1]`.
///
/// Values outside the range are clamped. An empty or inverted range maps
/// everything to white.
///
/// # Example
///
/// ```rust
/// use mesh_segmenter::colormap::jet;
///
/// assert_eq!(jet(0.0, 0.0, 1.0), [0.0, 0.0, 1.0]);
/// assert_eq!(jet(0.5, 0.0, 1.0), [0.0, 1.0, 0.0]);
/// assert_eq!(jet(1.0, 0.0, 1.0), [1.0, 0.0, 0.0]);
/// ```
pub fn jet(value: f32, min: f32, max: f32) -> [f32; 3] {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return [1.0, 1.0, 1.0];
    }
    let v = value.clamp(min, max);
    let (mut r, mut g, mut b) = (1.0, 1.0, 1.0);

    if v < min + 0.25 * range {
        r = 0.0;
        g = 4.0 * (v - min) / range;
    } else if v < min + 0.5 * range {
        r = 0.0;
        b = 1.0 + 4.0 * (min + 0.25 * range - v) / range;
    } else if v < min + 0.75 * range {
        r = 4.0 * (v - min - 0.5 * range) / range;
        b = 0.0;
    } else {
        g = 1.0 + 4.0 * (min + 0.75 * range - v) / range;
        b = 0.0;
    }

    [r, g, b]
}
