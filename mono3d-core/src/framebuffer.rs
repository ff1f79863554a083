/// Packed 1-bit framebuffer access
///
/// Pixels are stored row-major, eight per byte, with the leftmost pixel in
/// the most significant bit. Each row occupies `row_stride` bytes, which may
/// be more than `ceil(columns / 8)`.
use anyhow::{ensure, Result};

/// Byte holding the pixel at `(row, col)`.
#[inline]
pub fn byte_index(row: usize, col: usize, row_stride: usize) -> usize {
    row * row_stride + col / 8
}

#[inline]
pub fn set_pixel_on(data: &mut [u8], byte_index: usize, column: usize) {
    data[byte_index] |= 1 << (7 - (column % 8));
}

#[inline]
pub fn set_pixel_off(data: &mut [u8], byte_index: usize, column: usize) {
    data[byte_index] &= !(1 << (7 - (column % 8)));
}

/// Dimensions of the drawable area and the layout of its backing bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    columns: usize,
    rows: usize,
    row_stride: usize,
}

impl DisplayGeometry {
    pub fn new(columns: usize, rows: usize, row_stride: usize) -> Result<Self> {
        let geometry = Self {
            columns,
            rows,
            row_stride,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.columns > 0 && self.rows > 0,
            "display must be non-empty, got {}x{}",
            self.columns,
            self.rows
        );
        ensure!(
            self.row_stride >= self.columns.div_ceil(8),
            "row stride of {} bytes cannot hold {} columns",
            self.row_stride,
            self.columns
        );
        Ok(())
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Bytes a host buffer needs to back this display.
    pub fn buffer_len(&self) -> usize {
        self.rows * self.row_stride
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.columns as f32 / self.rows as f32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.columns && (y as usize) < self.rows
    }
}

/// A mutable view over host-owned frame memory.
///
/// The view borrows the bytes for as long as it lives, so the pipeline can
/// only write to a frame during the call it was handed in.
pub struct FrameBuffer<'a> {
    data: &'a mut [u8],
    geometry: DisplayGeometry,
}

impl<'a> FrameBuffer<'a> {
    pub fn new(data: &'a mut [u8], geometry: DisplayGeometry) -> Result<Self> {
        geometry.validate()?;
        ensure!(
            data.len() >= geometry.buffer_len(),
            "frame buffer holds {} bytes but {}x{} with stride {} needs {}",
            data.len(),
            geometry.columns,
            geometry.rows,
            geometry.row_stride,
            geometry.buffer_len()
        );
        Ok(Self { data, geometry })
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    pub fn columns(&self) -> usize {
        self.geometry.columns
    }

    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    pub fn row_stride(&self) -> usize {
        self.geometry.row_stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &*self.data
    }

    /// Write one pixel. Coordinates outside the display are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if !self.geometry.contains(x, y) {
            return;
        }
        let (col, row) = (x as usize, y as usize);
        let index = byte_index(row, col, self.geometry.row_stride);
        if on {
            set_pixel_on(self.data, index, col);
        } else {
            set_pixel_off(self.data, index, col);
        }
    }

    /// Read one pixel; anything outside the display reads as off.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if !self.geometry.contains(x, y) {
            return false;
        }
        let (col, row) = (x as usize, y as usize);
        self.data[byte_index(row, col, self.geometry.row_stride)] & (1 << (7 - (col % 8))) != 0
    }

    /// Fill every row of the display with one color.
    pub fn clear(&mut self, on: bool) {
        let len = self.geometry.buffer_len();
        self.data[..len].fill(if on { 0xFF } else { 0x00 });
    }

    /// Number of lit pixels inside the display area.
    pub fn count_lit(&self) -> usize {
        let mut count = 0;
        for y in 0..self.geometry.rows as i32 {
            for x in 0..self.geometry.columns as i32 {
                if self.get(x, y) {
                    count += 1;
                }
            }
        }
        count
    }
}
