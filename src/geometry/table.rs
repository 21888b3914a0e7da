//! Per-pixel source coordinate tables.

use super::GeometryError;

/// A row-major matrix holding one fractional source coordinate per
/// destination pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTable {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl CoordinateTable {
    /// Wraps `values`, which must hold exactly `width * height` entries.
    pub fn from_vec(width: u32, height: u32, values: Vec<f32>) -> Result<Self, GeometryError> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(values.len()) {
            return Err(GeometryError::InvalidTables(format!(
                "table of {}x{} cannot hold {} entries",
                width,
                height,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Builds a table by evaluating `f(x, y)` for every entry.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, GeometryError>
    where
        F: FnMut(u32, u32) -> f32,
    {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self::from_vec(width, height, values)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Entry for destination pixel `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the table.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.width && y < self.height, "table index out of bounds");
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// Entries of destination row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[f32] {
        assert!(y < self.height, "row index out of bounds");
        let w = self.width as usize;
        let start = y as usize * w;
        &self.values[start..start + w]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// The x-table and y-table of one remap.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTables {
    /// Source x coordinate per destination pixel.
    pub x: CoordinateTable,
    /// Source y coordinate per destination pixel.
    pub y: CoordinateTable,
}

impl CoordinateTables {
    pub fn new(x: CoordinateTable, y: CoordinateTable) -> Self {
        Self { x, y }
    }

    /// Tables that map every destination pixel onto the same source pixel.
    pub fn identity(width: u32, height: u32) -> Result<Self, GeometryError> {
        Ok(Self {
            x: CoordinateTable::from_fn(width, height, |x, _| x as f32)?,
            y: CoordinateTable::from_fn(width, height, |_, y| y as f32)?,
        })
    }
}
