#[macro_use]
macro_rules! identity_matrix {
    () => ([1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0, 0.0, 0.0, 1.0]);
}

#[cfg(feature = "serde-serialization")]
#[macro_use]
extern crate serde_derive;

pub mod utils;

pub mod vr_error;
pub mod vr_event;
pub mod vr_eye;
pub mod vr_field_view;
pub mod vr_gamepad;
pub mod vr_matrix;
pub mod vr_orientation;
pub mod vr_pose;
pub mod vr_runtime;
pub mod vr_settings;
pub mod vr_texture;

pub use vr_error::VRError;
pub use vr_event::{VREvent, VREventType};
pub use vr_eye::{VREye, VREyeParameters, VRHiddenAreaMesh};
pub use vr_field_view::VRFieldOfView;
pub use vr_gamepad::{VRAxisType, VRButton, VRControllerAxis, VRControllerRole, VRControllerState,
                     CONTROLLER_STATE_AXIS_COUNT};
pub use vr_matrix::{HmdMatrix34, HmdMatrix44, matrix34_to_array, matrix44_to_array};
pub use vr_orientation::{VREulerAngles, VRQuaternion};
pub use vr_pose::{VRTrackedDevicePose, VRTrackedDevicePoses, MAX_TRACKED_DEVICE_POSES,
                  TRACKED_DEVICE_INDEX_HMD, TRACKED_DEVICE_INDEX_INVALID};
pub use vr_runtime::{VRApplicationType, VRCompositor, VRDeviceProperty, VRInterface, VRRuntime,
                     VRSystem, VRTrackingOrigin};
pub use vr_settings::VRSettings;
pub use vr_texture::VRVulkanTextureData;
