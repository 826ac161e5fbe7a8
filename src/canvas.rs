use crate::error::{StarfieldError, StarfieldResult};

/// Bytes per pixel: gray then alpha, the libpng `PNG_FORMAT_GA` layout.
pub const BYTES_PER_PIXEL: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GrayAlpha {
    pub gray: u8,
    pub alpha: u8,
}

impl GrayAlpha {
    pub const TRANSPARENT: Self = Self { gray: 0, alpha: 0 };

    /// Opaque black, the color every star pixel is drawn with.
    pub const STAR: Self = Self {
        gray: 0,
        alpha: 0xff,
    };

    /// Any non-zero alpha counts as content for isolation purposes.
    pub fn is_opaque(self) -> bool {
        self.alpha != 0
    }
}

/// Canvas coordinate, `x` in `[0, width)` and `y` in `[0, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Row-major gray+alpha pixel buffer with fixed dimensions.
///
/// `data.len() == width * height * BYTES_PER_PIXEL` holds for every
/// constructed value; writes outside the canvas are clipped, never errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Fully transparent canvas of the given dimensions.
    pub fn new(width: u32, height: u32) -> StarfieldResult<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap an existing gray+alpha buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> StarfieldResult<Self> {
        let len = buffer_len(width, height)?;
        if data.len() != len {
            return Err(StarfieldError::validation(format!(
                "buffer length {} does not match {width}x{height} gray+alpha ({len} bytes)",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(img: &image::GrayAlphaImage) -> StarfieldResult<Self> {
        Self::from_raw(img.width(), img.height(), img.as_raw().clone())
    }

    pub fn to_image(&self) -> image::GrayAlphaImage {
        image::GrayAlphaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::GrayAlphaImage::new(self.width, self.height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < i64::from(self.width) && y >= 0 && y < i64::from(self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<GrayAlpha> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some(GrayAlpha {
            gray: self.data[i],
            alpha: self.data[i + 1],
        })
    }

    /// Clipped write: coordinates outside the canvas are silently skipped.
    pub fn put(&mut self, x: i64, y: i64, px: GrayAlpha) {
        if !self.contains(x, y) {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i] = px.gray;
        self.data[i + 1] = px.alpha;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}

fn buffer_len(width: u32, height: u32) -> StarfieldResult<usize> {
    if width == 0 || height == 0 {
        return Err(StarfieldError::validation(format!(
            "canvas dimensions must be > 0, got {width}x{height}"
        )));
    }
    Ok(width as usize * height as usize * BYTES_PER_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 4).is_err());
        assert!(Canvas::new(4, 0).is_err());
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(Canvas::from_raw(2, 2, vec![0; 7]).is_err());
        assert!(Canvas::from_raw(2, 2, vec![0; 8]).is_ok());
    }

    #[test]
    fn put_and_get_roundtrip() {
        let mut c = Canvas::new(4, 3).unwrap();
        c.put(2, 1, GrayAlpha::STAR);
        assert_eq!(c.get(2, 1), Some(GrayAlpha::STAR));
        assert_eq!(c.get(0, 0), Some(GrayAlpha::TRANSPARENT));
    }

    #[test]
    fn put_outside_is_a_noop() {
        let mut c = Canvas::new(2, 2).unwrap();
        let before = c.clone();
        c.put(-1, 0, GrayAlpha::STAR);
        c.put(0, -1, GrayAlpha::STAR);
        c.put(2, 0, GrayAlpha::STAR);
        c.put(0, 2, GrayAlpha::STAR);
        assert_eq!(c, before);
    }

    #[test]
    fn get_outside_is_none() {
        let c = Canvas::new(2, 2).unwrap();
        assert_eq!(c.get(2, 0), None);
        assert_eq!(c.get(0, 2), None);
    }

    #[test]
    fn image_roundtrip_preserves_pixels() {
        let mut c = Canvas::new(3, 2).unwrap();
        c.put(1, 1, GrayAlpha { gray: 7, alpha: 9 });
        let img = c.to_image();
        assert_eq!(img.get_pixel(1, 1).0, [7, 9]);
        let back = Canvas::from_image(&img).unwrap();
        assert_eq!(back, c);
    }
}
