use crate::error::{GenError, Result};

// Row-major width×height buffer; access as `cells[y * width + x]`.
// Every stage hands its output back as an owned Grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    // Grid filled with `value`; dimensions are validated before allocating
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        let len = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; len],
        })
    }
}

impl<T> Grid<T> {
    // Wrap an existing row-major buffer; its length must equal width×height
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        let len = checked_area(width, height)?;
        if cells.len() != len {
            return Err(GenError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    // Build a grid of the same shape by mapping every cell
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(self.offset(x, y))
        } else {
            None
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }
}

impl<T> std::ops::Index<usize> for Grid<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.cells[i]
    }
}

impl<T> std::ops::IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.cells[i]
    }
}

// Both sides must be positive and fit an i32: coordinates are drawn as i32
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    checked_area(width, height).map(|_| ())
}

fn checked_area(width: usize, height: usize) -> Result<usize> {
    let bad = || GenError::InvalidDimensions { width, height };
    if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(bad());
    }
    width.checked_mul(height).ok_or_else(bad)
}
