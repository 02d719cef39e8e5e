use image::{GrayImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color maps available for the visible plane, in their default cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMap {
    Bone,
    Turbo,
    DeepGreen,
    Ocean,
    Hot,
    Magma,
    Inferno,
    TwilightShifted,
}

impl ColorMap {
    pub const ALL: [ColorMap; 8] = [
        ColorMap::Bone,
        ColorMap::Turbo,
        ColorMap::DeepGreen,
        ColorMap::Ocean,
        ColorMap::Hot,
        ColorMap::Magma,
        ColorMap::Inferno,
        ColorMap::TwilightShifted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorMap::Bone => "Bone",
            ColorMap::Turbo => "Turbo",
            ColorMap::DeepGreen => "DeepGreen",
            ColorMap::Ocean => "Ocean",
            ColorMap::Hot => "Hot",
            ColorMap::Magma => "Magma",
            ColorMap::Inferno => "Inferno",
            ColorMap::TwilightShifted => "TwilightShifted",
        }
    }

    /// Gradient stops as `(position, [r, g, b])`, positions ascending in `0.0..=1.0`
    fn stops(&self) -> &'static [(f32, [u8; 3])] {
        match self {
            ColorMap::Bone => &[
                (0.0, [0, 0, 0]),
                (0.375, [81, 81, 113]),
                (0.75, [166, 198, 198]),
                (1.0, [255, 255, 255]),
            ],
            ColorMap::Turbo => &[
                (0.0, [48, 18, 59]),
                (0.125, [65, 69, 171]),
                (0.25, [57, 162, 252]),
                (0.375, [27, 229, 181]),
                (0.5, [116, 254, 93]),
                (0.625, [201, 239, 52]),
                (0.75, [251, 185, 56]),
                (0.875, [234, 79, 13]),
                (1.0, [122, 4, 3]),
            ],
            ColorMap::DeepGreen => &[
                (0.0, [1, 5, 1]),
                (0.33, [7, 79, 30]),
                (0.66, [58, 167, 76]),
                (1.0, [205, 255, 193]),
            ],
            ColorMap::Ocean => &[
                (0.0, [0, 128, 0]),
                (0.333, [0, 0, 85]),
                (0.667, [0, 128, 170]),
                (1.0, [255, 255, 255]),
            ],
            ColorMap::Hot => &[
                (0.0, [11, 0, 0]),
                (0.375, [255, 0, 0]),
                (0.75, [255, 255, 0]),
                (1.0, [255, 255, 255]),
            ],
            ColorMap::Magma => &[
                (0.0, [0, 0, 4]),
                (0.25, [81, 18, 124]),
                (0.5, [183, 55, 121]),
                (0.75, [252, 137, 97]),
                (1.0, [252, 253, 191]),
            ],
            ColorMap::Inferno => &[
                (0.0, [0, 0, 4]),
                (0.25, [87, 16, 110]),
                (0.5, [188, 55, 84]),
                (0.75, [249, 142, 9]),
                (1.0, [252, 255, 164]),
            ],
            ColorMap::TwilightShifted => &[
                (0.0, [47, 20, 54]),
                (0.25, [94, 67, 163]),
                (0.5, [226, 217, 226]),
                (0.75, [176, 92, 76]),
                (1.0, [47, 20, 54]),
            ],
        }
    }

    /// Build the 256-entry lookup table for this map
    pub fn lut(&self) -> [Rgb<u8>; 256] {
        let stops = self.stops();
        let mut table = [Rgb([0, 0, 0]); 256];

        for (index, entry) in table.iter_mut().enumerate() {
            let t = index as f32 / 255.0;
            let upper = stops
                .iter()
                .position(|(pos, _)| *pos >= t)
                .unwrap_or(stops.len() - 1)
                .max(1);
            let (p0, c0) = stops[upper - 1];
            let (p1, c1) = stops[upper];
            let span = (p1 - p0).max(f32::EPSILON);
            let f = ((t - p0) / span).clamp(0.0, 1.0);

            let mut rgb = [0u8; 3];
            for channel in 0..3 {
                let a = f32::from(c0[channel]);
                let b = f32::from(c1[channel]);
                rgb[channel] = (a + (b - a) * f).round() as u8;
            }
            *entry = Rgb(rgb);
        }

        table
    }

    /// Map every luma value through this color map
    pub fn apply(&self, luma: &GrayImage) -> RgbImage {
        let lut = self.lut();
        RgbImage::from_fn(luma.width(), luma.height(), |x, y| {
            lut[luma.get_pixel(x, y)[0] as usize]
        })
    }
}

impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_lut_endpoints_match_stops() {
        for map in ColorMap::ALL {
            let lut = map.lut();
            let stops = map.stops();
            assert_eq!(lut[0].0, stops[0].1, "{} start", map);
            assert_eq!(lut[255].0, stops[stops.len() - 1].1, "{} end", map);
        }
    }

    #[test]
    fn test_stops_are_ordered() {
        for map in ColorMap::ALL {
            let stops = map.stops();
            assert!(stops.len() >= 2);
            assert!(stops.windows(2).all(|w| w[0].0 < w[1].0), "{}", map);
        }
    }

    #[test]
    fn test_bone_is_monotonic() {
        let lut = ColorMap::Bone.lut();
        for pair in lut.windows(2) {
            let a: u32 = pair[0].0.iter().map(|&c| u32::from(c)).sum();
            let b: u32 = pair[1].0.iter().map(|&c| u32::from(c)).sum();
            assert!(b >= a);
        }
    }

    #[test]
    fn test_apply_preserves_dimensions() {
        let mut luma = GrayImage::new(3, 2);
        luma.put_pixel(2, 1, Luma([255]));

        let colored = ColorMap::Hot.apply(&luma);
        assert_eq!(colored.dimensions(), (3, 2));
        assert_eq!(colored.get_pixel(0, 0).0, [11, 0, 0]);
        assert_eq!(colored.get_pixel(2, 1).0, [255, 255, 255]);
    }

    #[test]
    fn test_names() {
        assert_eq!(ColorMap::TwilightShifted.to_string(), "TwilightShifted");
        assert_eq!(ColorMap::ALL[0].name(), "Bone");
    }
}
