//! HSV / RGB / CIE-xy conversions used when talking to the bridge.
//!
//! Hue and saturation are 0.0–1.0, value/brightness is 0–255. The xy
//! conversions use the wide-gamut matrices published for Hue-class lamps,
//! with sRGB gamma correction; the round trip is lossy at quantization
//! boundaries.

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }

    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let rangec = maxc - minc;
    let v = maxc;

    if rangec == 0.0 {
        return (0.0, 0.0, v);
    }

    let s = rangec / maxc;
    let rc = (maxc - r) / rangec;
    let gc = (maxc - g) / rangec;
    let bc = (maxc - b) / rangec;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}

fn gamma_correction(value: f64) -> f64 {
    if value > 0.04045 {
        ((value + 0.055) / 1.055).powf(2.4)
    } else {
        value / 12.92
    }
}

fn rev_gamma_correction(value: f64) -> f64 {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

pub fn rgb_to_xy(r: f64, g: f64, b: f64) -> (f64, f64) {
    let r = gamma_correction(r / 255.0);
    let g = gamma_correction(g / 255.0);
    let b = gamma_correction(b / 255.0);

    let x = r * 0.649926 + g * 0.103455 + b * 0.197109;
    let y = r * 0.234327 + g * 0.743075 + b * 0.022598;
    let z = g * 0.053077 + b * 1.035763;

    (x / (x + y + z), y / (x + y + z))
}

pub fn xyb_to_rgb(x: f64, y: f64, bri: f64) -> (u8, u8, u8) {
    let z = 1.0 - x - y;
    let cap_y = bri / 255.0;
    let cap_x = (cap_y / y) * x;
    let cap_z = (cap_y / y) * z;

    let r = cap_x * 1.656492 - cap_y * 0.354851 - cap_z * 0.255038;
    let g = -cap_x * 0.707196 + cap_y * 1.655397 + cap_z * 0.036152;
    let b = cap_x * 0.051713 - cap_y * 0.121364 + cap_z * 1.011530;

    let mut r = rev_gamma_correction(r).max(0.0);
    let mut g = rev_gamma_correction(g).max(0.0);
    let mut b = rev_gamma_correction(b).max(0.0);

    // A component above 1 means the color is outside the displayable
    // range; scale everything down by that component.
    let m = r.max(g).max(b);
    if m > 1.0 {
        r /= m;
        g /= m;
        b /= m;
    }

    (
        (r * 255.0).floor() as u8,
        (g * 255.0).floor() as u8,
        (b * 255.0).floor() as u8,
    )
}

pub fn xyb_to_hsv(x: f64, y: f64, bri: f64) -> (f64, f64, f64) {
    let (r, g, b) = xyb_to_rgb(x, y, bri);
    rgb_to_hsv(r as f64, g as f64, b as f64)
}

pub fn hsv_to_xy(h: f64, s: f64, v: f64) -> (f64, f64) {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    rgb_to_xy(r, g, b)
}
