// Conversions from the runtime's row-major matrices ([row][column]) to the
// flat column-major [f32; 16] layout the renderer consumes.

pub type HmdMatrix34 = [[f32; 4]; 3];
pub type HmdMatrix44 = [[f32; 4]; 4];

pub const IDENTITY_MATRIX34: HmdMatrix34 = [[1.0, 0.0, 0.0, 0.0],
                                            [0.0, 1.0, 0.0, 0.0],
                                            [0.0, 0.0, 1.0, 0.0]];

/// Lays a 3x4 rotation+translation matrix out as a flat 4x4.
///
/// The missing fourth row is zero filled, including the homogeneous element.
/// Callers that need an affine transform must write `out[15] = 1.0` themselves.
#[inline]
pub fn matrix34_to_array(matrix: &HmdMatrix34) -> [f32; 16] {
    let m = matrix;
    [m[0][0], m[1][0], m[2][0], 0.0,
     m[0][1], m[1][1], m[2][1], 0.0,
     m[0][2], m[1][2], m[2][2], 0.0,
     m[0][3], m[1][3], m[2][3], 0.0]
}

#[inline]
pub fn matrix44_to_array(matrix: &HmdMatrix44) -> [f32; 16] {
    let m = matrix;
    [m[0][0], m[1][0], m[2][0], m[3][0],
     m[0][1], m[1][1], m[2][1], m[3][1],
     m[0][2], m[1][2], m[2][2], m[3][2],
     m[0][3], m[1][3], m[2][3], m[3][3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix34_layout_is_column_major_without_homogeneous_row() {
        let m = [[1.0, 2.0, 3.0, 4.0],
                 [5.0, 6.0, 7.0, 8.0],
                 [9.0, 10.0, 11.0, 12.0]];
        let out = matrix34_to_array(&m);
        assert_eq!(out, [1.0, 5.0, 9.0, 0.0,
                         2.0, 6.0, 10.0, 0.0,
                         3.0, 7.0, 11.0, 0.0,
                         4.0, 8.0, 12.0, 0.0]);
    }

    #[test]
    fn matrix44_is_a_plain_transpose() {
        let mut m = [[0.0f32; 4]; 4];
        for r in 0..4 {
            for c in 0..4 {
                m[r][c] = (r * 4 + c) as f32;
            }
        }
        let out = matrix44_to_array(&m);
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(out[c * 4 + r], m[r][c]);
            }
        }
    }
}
