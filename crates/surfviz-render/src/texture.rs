//! Procedural grid texture applied to every surface.
//!
//! A 256×256 white canvas with light gray lines every 32 pixels, repeated
//! across the UV square. Generated once per viewer and shared by all surfaces.

/// RGBA8 pixel
pub type Rgba8 = [u8; 4];

#[derive(Debug, Clone, PartialEq)]
pub struct GridTexture {
    size: u32,
    cell: u32,
    line_width: u32,
    repeat: [u32; 2],
    pixels: Vec<Rgba8>,
}

impl GridTexture {
    pub const SIZE: u32 = 256;
    pub const CELL: u32 = 32;
    pub const LINE_WIDTH: u32 = 2;
    pub const BACKGROUND: Rgba8 = [0xff, 0xff, 0xff, 0xff];
    pub const LINE: Rgba8 = [0xe0, 0xe0, 0xe0, 0xff];

    /// Generate the grid, repeated `repeat` times along both u and v.
    pub fn new(repeat: u32) -> Self {
        let size = Self::SIZE;
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let on_line = Self::on_line(x) || Self::on_line(y);
                pixels.push(if on_line { Self::LINE } else { Self::BACKGROUND });
            }
        }
        Self {
            size,
            cell: Self::CELL,
            line_width: Self::LINE_WIDTH,
            repeat: [repeat, repeat],
            pixels,
        }
    }

    /// Whether pixel column (or row) `p` is covered by a grid line.
    ///
    /// Lines sit on multiples of the cell size, including both canvas edges,
    /// and are centered on that coordinate.
    fn on_line(p: u32) -> bool {
        let half = Self::LINE_WIDTH / 2;
        let r = p % Self::CELL;
        r < Self::LINE_WIDTH - half || r >= Self::CELL - half
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn cell(&self) -> u32 {
        self.cell
    }

    pub fn line_width(&self) -> u32 {
        self.line_width
    }

    pub fn repeat(&self) -> [u32; 2] {
        self.repeat
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get((y * self.size + x) as usize).copied()
    }

    /// Nearest-pixel lookup at surface coordinate `(u, v)` with repeat wrapping.
    pub fn sample(&self, u: f64, v: f64) -> Rgba8 {
        let x = self.wrap(u * self.repeat[0] as f64);
        let y = self.wrap(v * self.repeat[1] as f64);
        self.pixels[(y * self.size + x) as usize]
    }

    fn wrap(&self, t: f64) -> u32 {
        let frac = t.rem_euclid(1.0);
        ((frac * self.size as f64) as u32).min(self.size - 1)
    }

    /// Raw RGBA8 bytes, row-major, for upload or encoding.
    pub fn rgba_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl Default for GridTexture {
    fn default() -> Self {
        Self::new(4)
    }
}
