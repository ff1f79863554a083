/// Ordered (Bayer) dithering for 1-bit output
///
/// A continuous brightness in `[0, 1]` is scaled to the table's value range
/// and compared against the threshold at the pixel's position, giving a
/// stable, spatially periodic pattern in place of gray levels.
use serde::{Deserialize, Serialize};

const BAYER_2X2: [[u32; 2]; 2] = [
    [0, 2],
    [3, 1],
];

const BAYER_4X4: [[u32; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

const BAYER_8X8: [[u32; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

const BAYER_16X16: [[u32; 16]; 16] = [
    [0, 128, 32, 160, 8, 136, 40, 168, 2, 130, 34, 162, 10, 138, 42, 170],
    [192, 64, 224, 96, 200, 72, 232, 104, 194, 66, 226, 98, 202, 74, 234, 106],
    [48, 176, 16, 144, 56, 184, 24, 152, 50, 178, 18, 146, 58, 186, 26, 154],
    [240, 112, 208, 80, 248, 120, 216, 88, 242, 114, 210, 82, 250, 122, 218, 90],
    [12, 140, 44, 172, 4, 132, 36, 164, 14, 142, 46, 174, 6, 134, 38, 166],
    [204, 76, 236, 108, 196, 68, 228, 100, 206, 78, 238, 110, 198, 70, 230, 102],
    [60, 188, 28, 156, 52, 180, 20, 148, 62, 190, 30, 158, 54, 182, 22, 150],
    [252, 124, 220, 92, 244, 116, 212, 84, 254, 126, 222, 94, 246, 118, 214, 86],
    [3, 131, 35, 163, 11, 139, 43, 171, 1, 129, 33, 161, 9, 137, 41, 169],
    [195, 67, 227, 99, 203, 75, 235, 107, 193, 65, 225, 97, 201, 73, 233, 105],
    [51, 179, 19, 147, 59, 187, 27, 155, 49, 177, 17, 145, 57, 185, 25, 153],
    [243, 115, 211, 83, 251, 123, 219, 91, 241, 113, 209, 81, 249, 121, 217, 89],
    [15, 143, 47, 175, 7, 135, 39, 167, 13, 141, 45, 173, 5, 133, 37, 165],
    [207, 79, 239, 111, 199, 71, 231, 103, 205, 77, 237, 109, 197, 69, 229, 101],
    [63, 191, 31, 159, 55, 183, 23, 151, 61, 189, 29, 157, 53, 181, 21, 149],
    [255, 127, 223, 95, 247, 119, 215, 87, 253, 125, 221, 93, 245, 117, 213, 85],
];

/// Supported threshold table sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BayerSize {
    X2,
    X4,
    #[default]
    X8,
    X16,
}

impl BayerSize {
    pub fn from_size(size: usize) -> Option<Self> {
        match size {
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            8 => Some(Self::X8),
            16 => Some(Self::X16),
            _ => None,
        }
    }

    /// Side length N of the table.
    pub fn dimension(self) -> usize {
        match self {
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }

    /// Number of distinct thresholds, N².
    pub fn levels(self) -> u32 {
        let n = self.dimension() as u32;
        n * n
    }

    pub fn threshold(self, row: usize, col: usize) -> u32 {
        let n = self.dimension();
        let (r, c) = (row % n, col % n);
        match self {
            Self::X2 => BAYER_2X2[r][c],
            Self::X4 => BAYER_4X4[r][c],
            Self::X8 => BAYER_8X8[r][c],
            Self::X16 => BAYER_16X16[r][c],
        }
    }

    /// Whether a pixel of the given brightness is on at `(row, col)`.
    ///
    /// On when `brightness * N² > threshold`, so raising the brightness never
    /// turns a pixel off.
    pub fn is_lit(self, brightness: f32, row: usize, col: usize) -> bool {
        brightness * self.levels() as f32 > self.threshold(row, col) as f32
    }
}

impl TryFrom<usize> for BayerSize {
    type Error = String;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::from_size(size)
            .ok_or_else(|| format!("unsupported Bayer size {} (expected 2, 4, 8 or 16)", size))
    }
}

impl From<BayerSize> for usize {
    fn from(size: BayerSize) -> usize {
        size.dimension()
    }
}

/// Threshold at `(row mod size, col mod size)`; unsupported sizes return 0.
pub fn bayer_value(row: usize, col: usize, size: usize) -> u32 {
    BayerSize::from_size(size)
        .map(|bayer| bayer.threshold(row, col))
        .unwrap_or(0)
}
