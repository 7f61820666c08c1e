//! Generators for synthetic head arrays and boundary rings.
//!
//! The values are predictable so tests can check exactly where each number
//! ended up.

/// Creates a (cells x steps) head array, flattened row-major.
///
/// Entry `(cell, step)` holds `step * 1000 + cell`, so after slicing column
/// `step` the value at flat position `i` is `step * 1000 + i`.
///
/// # Example
///
/// ```
/// use test_utils::create_head_array;
///
/// let data = create_head_array(100, 5);
/// assert_eq!(data.len(), 500);
/// assert_eq!(data[0], 0.0);      // cell 0, step 0
/// assert_eq!(data[1], 1000.0);   // cell 0, step 1
/// assert_eq!(data[5], 1.0);      // cell 1, step 0
/// ```
pub fn create_head_array(cells: usize, steps: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(cells * steps);
    for cell in 0..cells {
        for step in 0..steps {
            data.push((step * 1000 + cell) as f64);
        }
    }
    data
}

/// Closed axis-aligned square ring, counter-clockwise.
pub fn square_ring(min_x: f64, min_y: f64, size: f64) -> Vec<(f64, f64)> {
    vec![
        (min_x, min_y),
        (min_x + size, min_y),
        (min_x + size, min_y + size),
        (min_x, min_y + size),
        (min_x, min_y),
    ]
}

/// Closed L-shaped ring covering three quadrants of `[0, size]²`.
///
/// The north-east quadrant is outside.
pub fn l_shape_ring(size: f64) -> Vec<(f64, f64)> {
    let h = size / 2.0;
    vec![
        (0.0, 0.0),
        (size, 0.0),
        (size, h),
        (h, h),
        (h, size),
        (0.0, size),
        (0.0, 0.0),
    ]
}
