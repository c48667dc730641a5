// Full horizontal and vertical field of view, in degrees,
// derived from the left eye's projection.

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRFieldOfView {
    pub x_degrees: f32,
    pub y_degrees: f32,
}

impl Default for VRFieldOfView {
    fn default() -> VRFieldOfView {
        VRFieldOfView {
            x_degrees: 0.0,
            y_degrees: 0.0,
        }
    }
}

impl VRFieldOfView {
    // `projection` is column major with the vertical scale already negated
    pub fn from_projection(projection: &[f32; 16]) -> VRFieldOfView {
        VRFieldOfView {
            x_degrees: ((1.0 / projection[0]).atan() as f64 * 360.0 / std::f64::consts::PI) as f32,
            y_degrees: ((1.0 / -projection[5]).atan() as f64 * 360.0 / std::f64::consts::PI) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_is_ninety_degrees() {
        let mut projection: [f32; 16] = identity_matrix!();
        projection[5] = -1.0;
        let fov = VRFieldOfView::from_projection(&projection);
        assert!((fov.x_degrees - 90.0).abs() < 1e-4);
        assert!((fov.y_degrees - 90.0).abs() < 1e-4);
    }

    #[test]
    fn narrower_scale_gives_wider_field() {
        let mut projection: [f32; 16] = identity_matrix!();
        projection[0] = 0.75620246;
        projection[5] = -0.68050665;
        let fov = VRFieldOfView::from_projection(&projection);
        assert!(fov.x_degrees > 90.0);
        assert!(fov.y_degrees > fov.x_degrees);
    }
}
