//! Series colors: the Office palette for small country lists, evenly spaced hues beyond it.

use plotters::style::RGBColor;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// An ordered, indexable set of colors sized for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<RGBColor>,
}

impl Palette {
    /// `n` distinct colors: Office colors when they suffice, otherwise `n` evenly spaced hues.
    pub fn office(n: usize) -> Self {
        let colors = if n <= OFFICE10.len() {
            OFFICE10[..n].to_vec()
        } else {
            (0..n)
                .map(|i| hsl_to_rgb(360.0 * i as f64 / n as f64, 0.60, 0.45))
                .collect()
        };
        Self { colors }
    }

    pub fn from_colors(colors: Vec<RGBColor>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for series `idx`; wraps around when the palette is smaller than the list.
    pub fn color(&self, idx: usize) -> RGBColor {
        if self.colors.is_empty() {
            return OFFICE10[idx % OFFICE10.len()];
        }
        self.colors[idx % self.colors.len()]
    }
}

// HSL -> RGB conversion (linear; sufficient for chart colors)
fn hsl_to_rgb(h_deg: f64, s: f64, l: f64) -> RGBColor {
    let h = (h_deg % 360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    let to_u8 = |v: f64| (v * 255.0).round() as u8;
    RGBColor(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rgb(c: RGBColor) -> (u8, u8, u8) {
        (c.0, c.1, c.2)
    }

    #[test]
    fn office_palette_is_injective_and_ordered() {
        let p = Palette::office(8);
        assert_eq!(p.len(), 8);
        let distinct: HashSet<_> = (0..8).map(|i| rgb(p.color(i))).collect();
        assert_eq!(distinct.len(), 8);
        assert_eq!(rgb(p.color(0)), (68, 114, 196));
        assert_eq!(rgb(p.color(1)), (237, 125, 49));
    }

    #[test]
    fn large_lists_get_distinct_hues() {
        let p = Palette::office(24);
        let distinct: HashSet<_> = (0..24).map(|i| rgb(p.color(i))).collect();
        assert_eq!(distinct.len(), 24);
    }

    #[test]
    fn empty_palette_still_yields_colors() {
        let p = Palette::office(0);
        assert!(p.is_empty());
        assert_eq!(rgb(p.color(3)), (255, 192, 0));
    }
}
