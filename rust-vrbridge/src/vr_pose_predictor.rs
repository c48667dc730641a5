use rust_vrbridge_api::utils;
use rust_vrbridge_api::{VRAxisType, VRControllerAxis, VRControllerRole, VRDeviceProperty, VRSettings,
                        VRSystem, VRTrackedDevicePose, VRTrackedDevicePoses,
                        CONTROLLER_STATE_AXIS_COUNT, MAX_TRACKED_DEVICE_POSES, TRACKED_DEVICE_INDEX_HMD};

/// Seconds from now until the frame being prepared reaches the user's eyes:
/// the remainder of the current frame plus the display's vsync to photons latency.
pub fn predicted_seconds_to_photons<S: VRSystem>(system: &S, settings: &VRSettings) -> f32 {
    let seconds_since_vsync = match system.time_since_last_vsync() {
        Some((seconds, _)) => seconds,
        None => return settings.fallback_seconds_to_photons,
    };

    let display_frequency = match system.float_property(TRACKED_DEVICE_INDEX_HMD, VRDeviceProperty::DisplayFrequency) {
        Ok(frequency) if frequency > 0.0 => frequency,
        _ => settings.fallback_display_frequency,
    };
    let frame_duration = 1.0 / display_frequency;

    let vsync_to_photons = match system.float_property(TRACKED_DEVICE_INDEX_HMD,
                                                       VRDeviceProperty::SecondsFromVsyncToPhotons) {
        Ok(seconds) => seconds,
        Err(_) => return settings.fallback_seconds_to_photons,
    };

    frame_duration - seconds_since_vsync + vsync_to_photons
}

// Latest predicted poses of every tracked device, refreshed once per frame.
pub struct VRPosePredictor {
    poses: VRTrackedDevicePoses,
    predicted_seconds_to_photons: f32,
    timestamp: f64,
}

impl VRPosePredictor {
    pub fn new() -> VRPosePredictor {
        VRPosePredictor {
            poses: [VRTrackedDevicePose::default(); MAX_TRACKED_DEVICE_POSES],
            predicted_seconds_to_photons: 0.0,
            timestamp: 0.0,
        }
    }

    pub fn update<S: VRSystem>(&mut self, system: &S, settings: &VRSettings) {
        let seconds = predicted_seconds_to_photons(system, settings);
        system.device_to_absolute_tracking_pose(settings.tracking_origin, seconds, &mut self.poses);
        self.predicted_seconds_to_photons = seconds;
        self.timestamp = utils::timestamp();
    }

    pub fn poses(&self) -> &VRTrackedDevicePoses {
        &self.poses
    }

    pub fn pose(&self, device_index: u32) -> Option<&VRTrackedDevicePose> {
        self.poses.get(device_index as usize)
    }

    pub fn hmd_pose(&self) -> &VRTrackedDevicePose {
        &self.poses[TRACKED_DEVICE_INDEX_HMD as usize]
    }

    pub fn predicted_seconds_to_photons(&self) -> f32 {
        self.predicted_seconds_to_photons
    }

    // Milliseconds since the epoch at the last update
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Pose of the controller in `role`, if the runtime knows which device has
    /// that role and tracked it validly this frame.
    pub fn controller_pose<S: VRSystem>(&self, system: &S, role: VRControllerRole) -> Option<VRTrackedDevicePose> {
        let device_index = system.tracked_device_index_for_controller_role(role);
        self.pose(device_index)
            .filter(|pose| pose.pose_is_valid)
            .cloned()
    }
}

/// Current value of the first axis slot the `role` controller declares as
/// `axis_type`. None when there's no such controller or axis.
pub fn controller_axis<S: VRSystem>(system: &S,
                                    role: VRControllerRole,
                                    axis_type: VRAxisType)
                                    -> Option<VRControllerAxis> {
    let device_index = system.tracked_device_index_for_controller_role(role);
    let state = system.controller_state(device_index)?;

    (0..CONTROLLER_STATE_AXIS_COUNT)
        .find(|&slot| {
            system.int32_property(device_index, VRDeviceProperty::AxisType(slot as u32))
                  .map_or(false, |raw| VRAxisType::from_raw(raw) == axis_type)
        })
        .map(|slot| state.axis[slot])
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::api::{MockVRCall, MockVRController, MockVRRuntime};
    use rust_vrbridge_api::{VRRuntime, VRTrackingOrigin, TRACKED_DEVICE_INDEX_INVALID};

    fn system(runtime: &MockVRRuntime) -> <MockVRRuntime as VRRuntime>::System {
        runtime.system().unwrap()
    }

    #[test]
    fn prediction_uses_remaining_frame_time() {
        let runtime = MockVRRuntime::new();
        {
            let state = runtime.state_handle();
            let mut state = state.borrow_mut();
            state.seconds_since_vsync = Some(0.004);
            state.display_frequency = Some(90.0);
            state.seconds_from_vsync_to_photons = Some(0.011);
        }
        let seconds = predicted_seconds_to_photons(&system(&runtime), &VRSettings::default());
        assert!((seconds - (1.0 / 90.0 - 0.004 + 0.011)).abs() < 1e-6);
    }

    #[test]
    fn prediction_falls_back_without_vsync_timing() {
        let runtime = MockVRRuntime::new();
        runtime.state_handle().borrow_mut().seconds_since_vsync = None;
        let settings = VRSettings::default();
        assert_eq!(predicted_seconds_to_photons(&system(&runtime), &settings),
                   settings.fallback_seconds_to_photons);
    }

    #[test]
    fn prediction_falls_back_to_default_frequency() {
        let runtime = MockVRRuntime::new();
        {
            let state = runtime.state_handle();
            let mut state = state.borrow_mut();
            state.seconds_since_vsync = Some(0.0);
            state.display_frequency = None;
            state.seconds_from_vsync_to_photons = Some(0.0);
        }
        let mut settings = VRSettings::default();
        settings.fallback_display_frequency = 120.0;
        let seconds = predicted_seconds_to_photons(&system(&runtime), &settings);
        assert!((seconds - 1.0 / 120.0).abs() < 1e-6);
    }

    #[test]
    fn update_fetches_poses_at_the_predicted_time() {
        let runtime = MockVRRuntime::new();
        let mut predictor = VRPosePredictor::new();
        let settings = VRSettings::default();
        predictor.update(&system(&runtime), &settings);

        let expected = 1.0 / 90.0 - 0.005 + 0.011;
        let state = runtime.state_handle();
        match state.borrow().calls.last() {
            Some(&MockVRCall::GetPoses { origin, predicted_seconds_to_photons }) => {
                assert_eq!(origin, VRTrackingOrigin::Standing);
                assert!((predicted_seconds_to_photons - expected).abs() < 1e-6);
            }
            other => panic!("unexpected call {:?}", other),
        }
        assert!((predictor.predicted_seconds_to_photons() - expected).abs() < 1e-6);
        assert!(predictor.hmd_pose().pose_is_valid);
        assert_eq!(predictor.hmd_pose().position(), [0.5, 1.7, -0.3]);
        assert!(predictor.timestamp() > 0.0);
    }

    #[test]
    fn controller_pose_requires_a_valid_pose() {
        let runtime = MockVRRuntime::new();
        let system = system(&runtime);
        let mut predictor = VRPosePredictor::new();
        predictor.update(&system, &VRSettings::default());
        assert_eq!(predictor.controller_pose(&system, VRControllerRole::LeftHand), None);

        let mut pose = VRTrackedDevicePose::default();
        pose.pose_is_valid = true;
        runtime.state_handle().borrow_mut().poses[1] = pose;
        predictor.update(&system, &VRSettings::default());
        assert_eq!(predictor.controller_pose(&system, VRControllerRole::LeftHand), Some(pose));
    }

    #[test]
    fn controller_pose_of_unassigned_role() {
        let runtime = MockVRRuntime::new();
        runtime.state_handle().borrow_mut().controllers.remove(&VRControllerRole::RightHand);
        let system = system(&runtime);
        assert_eq!(system.tracked_device_index_for_controller_role(VRControllerRole::RightHand),
                   TRACKED_DEVICE_INDEX_INVALID);

        let predictor = VRPosePredictor::new();
        assert_eq!(predictor.controller_pose(&system, VRControllerRole::RightHand), None);
    }

    #[test]
    fn axis_lookup_uses_declared_slot() {
        let runtime = MockVRRuntime::new();
        let mut controller = MockVRController::new(1, [VRAxisType::Trigger, VRAxisType::None,
                                                       VRAxisType::Joystick, VRAxisType::Joystick,
                                                       VRAxisType::None]);
        controller.state.axis[2] = VRControllerAxis { x: 0.25, y: -0.5 };
        controller.state.axis[3] = VRControllerAxis { x: 1.0, y: 1.0 };
        runtime.state_handle().borrow_mut().controllers.insert(VRControllerRole::LeftHand, controller);

        let system = system(&runtime);
        assert_eq!(controller_axis(&system, VRControllerRole::LeftHand, VRAxisType::Joystick),
                   Some(VRControllerAxis { x: 0.25, y: -0.5 }));
        assert_eq!(controller_axis(&system, VRControllerRole::LeftHand, VRAxisType::TrackPad), None);
    }

    #[test]
    fn axis_lookup_without_controller() {
        let runtime = MockVRRuntime::new();
        runtime.state_handle().borrow_mut().controllers.clear();
        assert_eq!(controller_axis(&system(&runtime), VRControllerRole::LeftHand, VRAxisType::TrackPad),
                   None);
    }
}
