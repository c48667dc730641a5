#[cfg(feature = "openvr")]
extern crate libloading;
#[macro_use]
extern crate log;
#[cfg(feature = "openvr")]
extern crate openvr_sys;
extern crate rust_vrbridge_api;

pub mod api;
mod vr_context;
mod vr_frame;
mod vr_input;
mod vr_pose_predictor;
mod vr_session;

pub use rust_vrbridge_api::*;
pub use vr_context::VRContext;
pub use vr_frame::VRFramePipeline;
pub use vr_input::{axis_to_direction_key, VRInputSink, VRKey, VRKeyDest, VRUserCmd};
pub use vr_pose_predictor::{predicted_seconds_to_photons, VRPosePredictor};
pub use vr_session::VRSession;
