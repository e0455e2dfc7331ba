/// RGB triple, each channel in [0, 255].
pub type Rgb = (u8, u8, u8);

/// Round and clamp a floating channel value into [0, 255].
///
/// # Example
/// ```
/// use ac_core::color::clamp_channel;
/// assert_eq!(clamp_channel(-12.0), 0);
/// assert_eq!(clamp_channel(127.6), 128);
/// assert_eq!(clamp_channel(300.0), 255);
/// ```
#[inline(always)]
#[must_use]
pub fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Clamp a scalar into the unit interval. NaN collapses to 0.
///
/// # Example
/// ```
/// use ac_core::color::clamp_unit;
/// assert_eq!(clamp_unit(1.2), 1.0);
/// assert_eq!(clamp_unit(-0.1), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Format as `#rrggbb`.
///
/// # Example
/// ```
/// use ac_core::color::to_hex;
/// assert_eq!(to_hex((255, 176, 0)), "#ffb000");
/// ```
#[must_use]
pub fn to_hex((r, g, b): Rgb) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Format as a CSS `rgb(r, g, b)` function.
///
/// # Example
/// ```
/// use ac_core::color::to_css_rgb;
/// assert_eq!(to_css_rgb((40, 80, 255)), "rgb(40, 80, 255)");
/// ```
#[must_use]
pub fn to_css_rgb((r, g, b): Rgb) -> String {
    format!("rgb({r}, {g}, {b})")
}
