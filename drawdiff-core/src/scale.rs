use serde::{Deserialize, Serialize};

/// Linear map from a data domain onto a drawing range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Round-numbered tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 || !d0.is_finite() || !d1.is_finite() {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }
        let (lo, hi) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else { return Vec::new() };
        let mut out: Vec<f64> = (i1..=i2)
            .map(|i| if inc < 0.0 { i as f64 / -inc } else { i as f64 * inc })
            .collect();
        if d1 < d0 {
            out.reverse();
        }
        out
    }

    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        if count == 0 || lo == hi {
            return None;
        }
        let (_, _, inc) = tick_spec(lo, hi, count as f64)?;
        Some(if inc < 0.0 { 1.0 / -inc } else { inc })
    }

    /// Labels for [`ticks`](Self::ticks), with as many decimals as the step needs.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let decimals = self.tick_step(count).map(precision_for).unwrap_or(0);
        self.ticks(count).into_iter().map(|v| (v, format_fixed(v, decimals))).collect()
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round() as i64;
        i2 = (stop * k).round() as i64;
        if (i1 as f64) / k < start { i1 += 1; }
        if (i2 as f64) / k > stop { i2 -= 1; }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round() as i64;
        i2 = (stop / k).round() as i64;
        if (i1 as f64) * k < start { i1 += 1; }
        if (i2 as f64) * k > stop { i2 -= 1; }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if i2 < i1 {
        return None;
    }
    Some((i1, i2, inc))
}

fn precision_for(step: f64) -> usize {
    let exp = (step.abs().log10() + 1e-9).floor();
    if exp >= 0.0 { 0 } else { (-exp) as usize }
}

fn format_fixed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    // "-0.0" reads badly on an axis
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') { s[1..].to_owned() } else { s }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// ColorBrewer yellow-green-blue, light to dark.
const YL_GN_BU: [Rgb; 9] = [
    Rgb::new(0xff, 0xff, 0xd9),
    Rgb::new(0xed, 0xf8, 0xb1),
    Rgb::new(0xc7, 0xe9, 0xb4),
    Rgb::new(0x7f, 0xcd, 0xbb),
    Rgb::new(0x41, 0xb6, 0xc4),
    Rgb::new(0x1d, 0x91, 0xc0),
    Rgb::new(0x22, 0x5e, 0xa8),
    Rgb::new(0x25, 0x34, 0x94),
    Rgb::new(0x08, 0x1d, 0x58),
];

/// Maps a numeric domain onto the yellow-green-blue ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialColor {
    pub domain: (f64, f64),
}

impl SequentialColor {
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    pub fn map(&self, v: f64) -> Rgb {
        let (d0, d1) = self.domain;
        let t = if d1 == d0 { 0.5 } else { ((v - d0) / (d1 - d0)).clamp(0.0, 1.0) };
        interpolate_yl_gn_bu(t)
    }
}

pub fn interpolate_yl_gn_bu(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (YL_GN_BU.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(YL_GN_BU.len() - 2);
    YL_GN_BU[i].lerp(YL_GN_BU[i + 1], pos - i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn maps_endpoints() { let s = LinearScale::new((0.0, 10.0), (80.0, 880.0)); assert_eq!(s.map(0.0), 80.0); assert_eq!(s.map(10.0), 880.0); assert_eq!(s.map(5.0), 480.0); }
    #[test] fn inverted_range() { let s = LinearScale::new((0.0, 4.0), (460.0, 80.0)); assert_eq!(s.map(0.0), 460.0); assert_eq!(s.map(4.0), 80.0); }
    #[test] fn invert_round_trips() { let s = LinearScale::new((0.0, 10.0), (80.0, 880.0)); assert!((s.invert(s.map(3.7)) - 3.7).abs() < 1e-9); }
    #[test] fn flat_domain_maps_to_range_start() { assert_eq!(LinearScale::new((3.0, 3.0), (10.0, 20.0)).map(3.0), 10.0); }

    #[test]
    fn ticks_zero_to_ten() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 1.0));
        assert_eq!(s.ticks(10), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(s.ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn ticks_stay_inside_domain() {
        let s = LinearScale::new((0.2, 9.51), (0.0, 1.0));
        let t = s.ticks(10);
        assert_eq!(t.first(), Some(&1.0));
        assert_eq!(t.last(), Some(&9.0));
    }

    #[test]
    fn fractional_ticks_and_labels() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        let labels = s.tick_labels(5);
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[1].1, "0.2");
        assert_eq!(labels[5].1, "1.0");
    }

    #[test]
    fn integer_labels_have_no_decimals() {
        let labels = LinearScale::new((0.0, 40.0), (0.0, 1.0)).tick_labels(4);
        assert_eq!(labels.iter().map(|(_, l)| l.as_str()).collect::<Vec<_>>(), vec!["0", "10", "20", "30", "40"]);
    }

    #[test] fn no_ticks_for_zero_count() { assert!(LinearScale::new((0.0, 1.0), (0.0, 1.0)).ticks(0).is_empty()); }
    #[test] fn single_tick_for_flat_domain() { assert_eq!(LinearScale::new((2.0, 2.0), (0.0, 1.0)).ticks(10), vec![2.0]); }
    #[test] fn negative_zero_label() { assert_eq!(format_fixed(-0.0001, 1), "0.0"); }

    #[test]
    fn ramp_endpoints() {
        assert_eq!(interpolate_yl_gn_bu(0.0), Rgb::new(0xff, 0xff, 0xd9));
        assert_eq!(interpolate_yl_gn_bu(1.0), Rgb::new(0x08, 0x1d, 0x58));
        assert_eq!(interpolate_yl_gn_bu(0.5), Rgb::new(0x41, 0xb6, 0xc4));
    }

    #[test]
    fn sequential_over_bin_index() {
        let c = SequentialColor::new((0.0, 9.0));
        assert_eq!(c.map(0.0), interpolate_yl_gn_bu(0.0));
        assert_eq!(c.map(9.0), interpolate_yl_gn_bu(1.0));
        assert_eq!(c.map(20.0), interpolate_yl_gn_bu(1.0));
        assert_eq!(SequentialColor::new((0.0, 0.0)).map(0.0), interpolate_yl_gn_bu(0.5));
    }

    #[test] fn hex() { assert_eq!(Rgb::new(8, 29, 88).to_hex(), "#081d58"); }
}
