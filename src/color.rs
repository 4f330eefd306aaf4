use std::ops::{ Add, Sub, Mul };

use crate::feq;

/// An RGB color.
///
/// Components are nominally in `[0.0, 1.0]`, but nothing clamps them until
/// a color is written out; lighting sums routinely exceed `1.0`.
///
/// # Examples
///
/// ```
/// # use brute_tracer::color::Color;
/// let yellow = Color::rgb(1.0, 1.0, 0.0);
/// let purple = Color::rgb(1.0, 0.0, 1.0);
/// assert_eq!(yellow * purple, Color::rgb(1.0, 0.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Component-wise approximate equality, like `Tuple4D`.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(c: [f64; 3]) -> Color {
        Color { r: c[0], g: c[1], b: c[2] }
    }
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    pub fn black() -> Color {
        Color { r: 0.0, g: 0.0, b: 0.0 }
    }

    pub fn white() -> Color {
        Color { r: 1.0, g: 1.0, b: 1.0 }
    }

    /// False if any component is `NaN` or infinite.
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Scales each component to `0..=max`, rounding to nearest and clamping
    /// out-of-range values.
    ///
    /// ```
    /// # use brute_tracer::color::Color;
    /// let c = Color::rgb(1.5, 0.5, -0.5);
    /// assert_eq!(c.to_channels(255), [255, 128, 0]);
    /// ```
    pub fn to_channels(&self, max: u16) -> [u16; 3] {
        let scale = |v: f64| {
            (v * max as f64).round().max(0.0).min(max as f64) as u16
        };

        [scale(self.r), scale(self.g), scale(self.b)]
    }

    /// Raises negative components to `floor`. `NaN` passes through.
    ///
    /// ```
    /// # use brute_tracer::color::Color;
    /// let c = Color::rgb(-0.5, 0.25, 2.0).max(0.0);
    /// assert_eq!(c, Color::rgb(0.0, 0.25, 2.0));
    /// ```
    pub fn max(self, floor: f64) -> Color {
        let clamp = |v: f64| if v < floor { floor } else { v };

        Color { r: clamp(self.r), g: clamp(self.g), b: clamp(self.b) }
    }

    /// Computes the Hadamard (component-wise) product of two colors.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color {
            r: c1.r * c2.r,
            g: c1.g * c2.g,
            b: c1.b * c2.b,
        }
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

/// Shorthand for `Color::hadamard`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 - c2, Color::rgb(0.2, 0.5, 0.5));
}

#[test]
fn scale_color() {
    let c = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(2.0 * c, Color::rgb(0.4, 0.6, 0.8));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn non_finite_colors() {
    assert!(Color::rgb(0.1, 0.2, 0.3).is_finite());
    assert!(!Color::rgb(std::f64::NAN, 0.2, 0.3).is_finite());
    assert!(!Color::rgb(0.1, std::f64::INFINITY, 0.3).is_finite());
}

#[test]
fn max_keeps_nan() {
    let c = Color::rgb(std::f64::NAN, -1.0, 0.5).max(0.0);

    assert!(c.r.is_nan());
    assert_eq!((c.g, c.b), (0.0, 0.5));
}

#[test]
fn channels_round_and_clamp() {
    assert_eq!(Color::rgb(0.8, 0.6, 1.0).to_channels(255), [204, 153, 255]);
    assert_eq!(Color::rgb(-3.0, 0.0, 42.0).to_channels(255), [0, 0, 255]);
}
