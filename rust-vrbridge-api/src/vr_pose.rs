use crate::vr_matrix::{HmdMatrix34, IDENTITY_MATRIX34};
use crate::vr_orientation::{self, VREulerAngles, VRQuaternion};

pub const MAX_TRACKED_DEVICE_POSES: usize = 16;
pub const TRACKED_DEVICE_INDEX_HMD: u32 = 0;
pub const TRACKED_DEVICE_INDEX_INVALID: u32 = 0xFFFF_FFFF;

pub type VRTrackedDevicePoses = [VRTrackedDevicePose; MAX_TRACKED_DEVICE_POSES];

// The state of a single tracked device at the predicted presentation time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRTrackedDevicePose {
    // Device to tracking-universe transform, row major 3x4
    pub device_to_absolute_tracking: HmdMatrix34,

    // Linear velocity in meters per second, tracking space
    pub velocity: [f32; 3],

    // Angular velocity in radians per second, tracking space
    pub angular_velocity: [f32; 3],

    // False when the runtime couldn't track the device for this frame
    pub pose_is_valid: bool,

    pub device_is_connected: bool,
}

impl Default for VRTrackedDevicePose {
    fn default() -> VRTrackedDevicePose {
        VRTrackedDevicePose {
            device_to_absolute_tracking: IDENTITY_MATRIX34,
            velocity: [0.0; 3],
            angular_velocity: [0.0; 3],
            pose_is_valid: false,
            device_is_connected: false,
        }
    }
}

impl VRTrackedDevicePose {
    pub fn position(&self) -> [f32; 3] {
        vr_orientation::matrix_to_position(&self.device_to_absolute_tracking)
    }

    pub fn orientation(&self) -> VREulerAngles {
        vr_orientation::matrix_to_euler(&self.device_to_absolute_tracking)
    }

    pub fn quaternion(&self) -> VRQuaternion {
        vr_orientation::quaternion_from_matrix(&self.device_to_absolute_tracking)
    }
}
