use serde::Serialize;

// ---------------------------------------------------------------------------
// Rgba – one fill colour
// ---------------------------------------------------------------------------

/// An RGBA colour as four integer channels. Channels are *not* clamped to
/// [0, 255]: a normalized price outside [0, 1] produces out-of-range
/// channels, matching the upstream behaviour this pipeline reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba(pub i32, pub i32, pub i32, pub i32);

/// Fill alpha shared by every scheme.
const ALPHA: i32 = 180;

// ---------------------------------------------------------------------------
// Price normalization
// ---------------------------------------------------------------------------

/// Rescale `price` against the reference bounds:
/// `t = (price - reference_min) / (reference_max - reference_min)`.
///
/// `t` is not clamped; prices outside the bounds extrapolate beyond [0, 1].
/// A zero-width reference range yields 0 rather than dividing by zero.
pub fn normalize(price: f64, reference_min: f64, reference_max: f64) -> f64 {
    let span = reference_max - reference_min;
    if span == 0.0 {
        return 0.0;
    }
    (price - reference_min) / span
}

// ---------------------------------------------------------------------------
// Interpolation schemes
// ---------------------------------------------------------------------------

/// How a normalized price becomes a fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// Red stays at 255, green fades out as the price rises. Used by the
    /// column and density views.
    RedGreen,
    /// Linear interpolation between a green and an orange anchor. Used by
    /// the scatter view.
    GreenOrange,
}

/// RGB anchors for [`ColorScheme::GreenOrange`].
const ANCHOR_LOW: [i32; 3] = [109, 255, 45];
const ANCHOR_HIGH: [i32; 3] = [255, 115, 45];

impl ColorScheme {
    /// Map a normalized price to a colour.
    pub fn shade(self, t: f64) -> Rgba {
        match self {
            ColorScheme::RedGreen => {
                let green = ((1.0 - t) * 255.0).round() as i32;
                Rgba(255, green, 0, ALPHA)
            }
            ColorScheme::GreenOrange => {
                let channel = |i: usize| {
                    let (low, high) = (ANCHOR_LOW[i], ANCHOR_HIGH[i]);
                    (low as f64 + (high - low) as f64 * t).round() as i32
                };
                Rgba(channel(0), channel(1), channel(2), ALPHA)
            }
        }
    }
}
