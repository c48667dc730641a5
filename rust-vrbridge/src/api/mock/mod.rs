mod runtime;

pub use self::runtime::{MockVRCall, MockVRCompositor, MockVRController, MockVRRuntime, MockVRState,
                        MockVRSystem};

use crate::{VRControllerAxis, VRControllerRole, VREvent, VRTrackedDevicePose};

// Scripted changes applied to a running mock runtime.
#[derive(Debug, Clone)]
pub enum MockVRControlMsg {
    SetPose(u32, VRTrackedDevicePose),
    QueueEvent(VREvent),
    SetController(VRControllerRole, MockVRController),
    SetAxis(VRControllerRole, usize, VRControllerAxis),
    SetVsyncTiming {
        seconds_since_vsync: Option<f32>,
        display_frequency: Option<f32>,
        seconds_from_vsync_to_photons: Option<f32>,
    },
    // Simulates a runtime restart: every acquired interface goes stale
    RestartRuntime,
}
