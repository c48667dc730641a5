use super::MockVRControlMsg;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use crate::{HmdMatrix34, HmdMatrix44, VRApplicationType, VRAxisType, VRCompositor, VRControllerRole,
           VRControllerState, VRDeviceProperty, VRError, VREvent, VREye, VRHiddenAreaMesh, VRInterface,
           VRRuntime, VRSystem, VRTrackedDevicePose, VRTrackedDevicePoses, VRTrackingOrigin,
           VRVulkanTextureData, CONTROLLER_STATE_AXIS_COUNT, MAX_TRACKED_DEVICE_POSES,
           TRACKED_DEVICE_INDEX_HMD, TRACKED_DEVICE_INDEX_INVALID};

// Runtime calls whose order matters to the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum MockVRCall {
    Init(VRApplicationType),
    GetPoses {
        origin: VRTrackingOrigin,
        predicted_seconds_to_photons: f32,
    },
    Submit {
        eye: VREye,
        image: u64,
    },
    WaitGetPoses,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockVRController {
    pub device_index: u32,
    pub state: VRControllerState,
    pub axis_types: [VRAxisType; CONTROLLER_STATE_AXIS_COUNT],
}

impl MockVRController {
    pub fn new(device_index: u32, axis_types: [VRAxisType; CONTROLLER_STATE_AXIS_COUNT]) -> MockVRController {
        MockVRController {
            device_index,
            state: VRControllerState::default(),
            axis_types,
        }
    }
}

pub struct MockVRState {
    pub runtime_installed: bool,
    pub hmd_present: bool,
    pub init_token: u32,
    pub interface_versions_valid: bool,
    pub system_available: bool,
    pub compositor_available: bool,

    pub system_acquisitions: u32,
    pub compositor_acquisitions: u32,
    pub shutdown_count: u32,
    pub calls: Vec<MockVRCall>,

    pub events: VecDeque<VREvent>,
    pub poses: VRTrackedDevicePoses,
    pub controllers: HashMap<VRControllerRole, MockVRController>,

    pub seconds_since_vsync: Option<f32>,
    pub display_frequency: Option<f32>,
    pub seconds_from_vsync_to_photons: Option<f32>,

    pub projections: [HmdMatrix44; 2],
    pub eye_to_head: [HmdMatrix34; 2],
    pub hidden_area_meshes: [VRHiddenAreaMesh; 2],
    pub render_target_size: (u32, u32),
    pub manufacturer_name: Option<String>,
    pub model_number: Option<String>,
    pub instance_extensions: String,
    pub device_extensions: String,
    pub submit_error: Option<u32>,
}

impl Default for MockVRState {
    fn default() -> MockVRState {
        // Simulates a virtual HTC Vive with both controllers connected
        let mut poses = [VRTrackedDevicePose::default(); MAX_TRACKED_DEVICE_POSES];
        poses[TRACKED_DEVICE_INDEX_HMD as usize] = VRTrackedDevicePose {
            device_to_absolute_tracking: [[1.0, 0.0, 0.0, 0.5],
                                          [0.0, 1.0, 0.0, 1.7],
                                          [0.0, 0.0, 1.0, -0.3]],
            pose_is_valid: true,
            device_is_connected: true,
            ..VRTrackedDevicePose::default()
        };

        let axis_types = [VRAxisType::TrackPad, VRAxisType::Trigger, VRAxisType::None,
                          VRAxisType::None, VRAxisType::None];
        let mut controllers = HashMap::new();
        controllers.insert(VRControllerRole::LeftHand, MockVRController::new(1, axis_types));
        controllers.insert(VRControllerRole::RightHand, MockVRController::new(2, axis_types));

        let hidden_area_mesh = VRHiddenAreaMesh {
            vertices: vec![[0.0, 0.0], [0.1, 0.0], [0.0, 0.1],
                           [1.0, 1.0], [0.9, 1.0], [1.0, 0.9]],
            triangle_count: 2,
        };

        MockVRState {
            runtime_installed: true,
            hmd_present: true,
            init_token: 1,
            interface_versions_valid: true,
            system_available: true,
            compositor_available: true,
            system_acquisitions: 0,
            compositor_acquisitions: 0,
            shutdown_count: 0,
            calls: Vec::new(),
            events: VecDeque::new(),
            poses,
            controllers,
            seconds_since_vsync: Some(0.005),
            display_frequency: Some(90.0),
            seconds_from_vsync_to_photons: Some(0.011),
            projections: [[[0.75620246, 0.0, -0.05713458, 0.0],
                           [0.0, 0.68050665, -0.0021225351, 0.0],
                           [0.0, 0.0, -1.0000999, -0.10000999],
                           [0.0, 0.0, -1.0, 0.0]],
                          [[0.75646526, 0.0, 0.055611316, 0.0],
                           [0.0, 0.68069947, -0.005315368, 0.0],
                           [0.0, 0.0, -1.0000999, -0.10000999],
                           [0.0, 0.0, -1.0, 0.0]]],
            eye_to_head: [[[1.0, 0.0, 0.0, -0.035949998],
                           [0.0, 1.0, 0.0, 0.0],
                           [0.0, 0.0, 1.0, 0.015]],
                          [[1.0, 0.0, 0.0, 0.035949998],
                           [0.0, 1.0, 0.0, 0.0],
                           [0.0, 0.0, 1.0, 0.015]]],
            hidden_area_meshes: [hidden_area_mesh.clone(), hidden_area_mesh],
            render_target_size: (1512, 1680),
            manufacturer_name: Some("HTC".into()),
            model_number: Some("Mock VRDisplay".into()),
            instance_extensions: "VK_KHR_external_memory_capabilities VK_KHR_get_physical_device_properties2".into(),
            device_extensions: "VK_KHR_dedicated_allocation VK_KHR_external_memory".into(),
            submit_error: None,
        }
    }
}

impl MockVRState {
    pub fn handle_msg(&mut self, msg: MockVRControlMsg) {
        match msg {
            MockVRControlMsg::SetPose(index, pose) => {
                if let Some(slot) = self.poses.get_mut(index as usize) {
                    *slot = pose;
                }
            }
            MockVRControlMsg::QueueEvent(event) => self.events.push_back(event),
            MockVRControlMsg::SetController(role, controller) => {
                self.controllers.insert(role, controller);
            }
            MockVRControlMsg::SetAxis(role, slot, axis) => {
                if let Some(controller) = self.controllers.get_mut(&role) {
                    if slot < CONTROLLER_STATE_AXIS_COUNT {
                        controller.state.axis[slot] = axis;
                    }
                }
            }
            MockVRControlMsg::SetVsyncTiming { seconds_since_vsync, display_frequency, seconds_from_vsync_to_photons } => {
                self.seconds_since_vsync = seconds_since_vsync;
                self.display_frequency = display_frequency;
                self.seconds_from_vsync_to_photons = seconds_from_vsync_to_photons;
            }
            MockVRControlMsg::RestartRuntime => self.init_token += 1,
        }
    }

    // Submit/WaitGetPoses calls only, in order.
    pub fn frame_calls(&self) -> Vec<MockVRCall> {
        self.calls.iter().filter(|call| match **call {
            MockVRCall::Submit { .. } | MockVRCall::WaitGetPoses => true,
            _ => false,
        }).cloned().collect()
    }

    fn controller_by_index(&self, device_index: u32) -> Option<(VRControllerRole, &MockVRController)> {
        self.controllers.iter()
            .find(|&(_, controller)| controller.device_index == device_index)
            .map(|(role, controller)| (*role, controller))
    }
}

pub struct MockVRRuntime {
    state: Rc<RefCell<MockVRState>>,
}

impl MockVRRuntime {
    pub fn new() -> MockVRRuntime {
        MockVRRuntime::with_state(MockVRState::default())
    }

    pub fn with_state(state: MockVRState) -> MockVRRuntime {
        MockVRRuntime {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn state_handle(&self) -> Rc<RefCell<MockVRState>> {
        self.state.clone()
    }

    pub fn handle_msg(&self, msg: MockVRControlMsg) {
        self.state.borrow_mut().handle_msg(msg);
    }
}

impl VRRuntime for MockVRRuntime {
    type System = MockVRSystem;
    type Compositor = MockVRCompositor;

    fn init(&mut self, application_type: VRApplicationType) -> Result<u32, VRError> {
        let mut state = self.state.borrow_mut();
        if !state.runtime_installed {
            return Err(VRError::RuntimeMissing("mock runtime not installed".into()));
        }
        if !state.hmd_present {
            return Err(VRError::HmdNotPresent);
        }
        state.calls.push(MockVRCall::Init(application_type));
        Ok(state.init_token)
    }

    fn init_token(&self) -> u32 {
        self.state.borrow().init_token
    }

    fn is_interface_version_valid(&self, _interface: VRInterface) -> bool {
        self.state.borrow().interface_versions_valid
    }

    fn system(&self) -> Result<MockVRSystem, VRError> {
        let mut state = self.state.borrow_mut();
        if !state.system_available {
            return Err(VRError::InterfaceUnavailable {
                interface: VRInterface::System.name(),
                reason: "mock interface disabled".into(),
            });
        }
        state.system_acquisitions += 1;
        Ok(MockVRSystem { state: self.state.clone() })
    }

    fn compositor(&self) -> Result<MockVRCompositor, VRError> {
        let mut state = self.state.borrow_mut();
        if !state.compositor_available {
            return Err(VRError::InterfaceUnavailable {
                interface: VRInterface::Compositor.name(),
                reason: "mock interface disabled".into(),
            });
        }
        state.compositor_acquisitions += 1;
        Ok(MockVRCompositor { state: self.state.clone() })
    }

    fn shutdown(&mut self) {
        let mut state = self.state.borrow_mut();
        state.shutdown_count += 1;
        state.calls.push(MockVRCall::Shutdown);
    }
}

#[derive(Clone)]
pub struct MockVRSystem {
    state: Rc<RefCell<MockVRState>>,
}

impl VRSystem for MockVRSystem {
    fn poll_next_event(&self) -> Option<VREvent> {
        self.state.borrow_mut().events.pop_front()
    }

    fn controller_state(&self, device_index: u32) -> Option<VRControllerState> {
        self.state.borrow().controller_by_index(device_index).map(|(_, controller)| controller.state)
    }

    fn tracked_device_index_for_controller_role(&self, role: VRControllerRole) -> u32 {
        self.state.borrow().controllers.get(&role)
            .map_or(TRACKED_DEVICE_INDEX_INVALID, |controller| controller.device_index)
    }

    fn controller_role_for_tracked_device_index(&self, device_index: u32) -> VRControllerRole {
        self.state.borrow().controller_by_index(device_index)
            .map_or(VRControllerRole::Invalid, |(role, _)| role)
    }

    fn device_to_absolute_tracking_pose(&self,
                                        origin: VRTrackingOrigin,
                                        predicted_seconds_to_photons: f32,
                                        poses: &mut [VRTrackedDevicePose]) {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockVRCall::GetPoses { origin, predicted_seconds_to_photons });
        for (out, pose) in poses.iter_mut().zip(state.poses.iter()) {
            *out = *pose;
        }
    }

    fn time_since_last_vsync(&self) -> Option<(f32, u64)> {
        self.state.borrow().seconds_since_vsync.map(|seconds| (seconds, 0))
    }

    fn eye_to_head_transform(&self, eye: VREye) -> HmdMatrix34 {
        self.state.borrow().eye_to_head[eye.index()]
    }

    fn projection_matrix(&self, eye: VREye, _near_z: f32, _far_z: f32) -> HmdMatrix44 {
        self.state.borrow().projections[eye.index()]
    }

    fn recommended_render_target_size(&self) -> (u32, u32) {
        self.state.borrow().render_target_size
    }

    fn hidden_area_mesh(&self, eye: VREye) -> VRHiddenAreaMesh {
        self.state.borrow().hidden_area_meshes[eye.index()].clone()
    }

    fn float_property(&self, device_index: u32, property: VRDeviceProperty) -> Result<f32, VRError> {
        let state = self.state.borrow();
        let value = match (device_index, property) {
            (TRACKED_DEVICE_INDEX_HMD, VRDeviceProperty::DisplayFrequency) => state.display_frequency,
            (TRACKED_DEVICE_INDEX_HMD, VRDeviceProperty::SecondsFromVsyncToPhotons) => {
                state.seconds_from_vsync_to_photons
            }
            _ => None,
        };
        value.ok_or(VRError::Unavailable)
    }

    fn int32_property(&self, device_index: u32, property: VRDeviceProperty) -> Result<i32, VRError> {
        let state = self.state.borrow();
        let slot = match property {
            VRDeviceProperty::AxisType(slot) => slot as usize,
            _ => return Err(VRError::Unavailable),
        };
        state.controller_by_index(device_index)
            .and_then(|(_, controller)| controller.axis_types.get(slot))
            .map(|axis_type| axis_type.to_raw())
            .ok_or(VRError::Unavailable)
    }

    fn string_property(&self,
                       device_index: u32,
                       property: VRDeviceProperty,
                       buffer: &mut [u8])
                       -> Result<u32, VRError> {
        let state = self.state.borrow();
        let value = match (device_index, property) {
            (TRACKED_DEVICE_INDEX_HMD, VRDeviceProperty::ManufacturerName) => state.manufacturer_name.as_ref(),
            (TRACKED_DEVICE_INDEX_HMD, VRDeviceProperty::ModelNumber) => state.model_number.as_ref(),
            _ => None,
        };
        let value = value.ok_or(VRError::Unavailable)?;
        let required = copy_nul_terminated(value, buffer);
        if buffer.len() < required as usize {
            return Err(VRError::BufferTooSmall { required });
        }
        Ok(required)
    }
}

#[derive(Clone)]
pub struct MockVRCompositor {
    state: Rc<RefCell<MockVRState>>,
}

impl VRCompositor for MockVRCompositor {
    fn submit(&self, eye: VREye, texture: &VRVulkanTextureData) -> Result<(), VRError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(MockVRCall::Submit { eye, image: texture.image });
        match state.submit_error {
            Some(code) => Err(VRError::Compositor(code)),
            None => Ok(()),
        }
    }

    fn wait_get_poses(&self) -> Result<(), VRError> {
        self.state.borrow_mut().calls.push(MockVRCall::WaitGetPoses);
        Ok(())
    }

    fn vulkan_instance_extensions_required(&self, buffer: &mut [u8]) -> u32 {
        copy_nul_terminated(&self.state.borrow().instance_extensions, buffer)
    }

    fn vulkan_device_extensions_required(&self, _physical_device: u64, buffer: &mut [u8]) -> u32 {
        copy_nul_terminated(&self.state.borrow().device_extensions, buffer)
    }
}

// Returns the length the value needs including its terminator, writing it
// only when the buffer is large enough. Empty values need no buffer at all.
fn copy_nul_terminated(value: &str, buffer: &mut [u8]) -> u32 {
    if value.is_empty() {
        return 0;
    }
    let bytes = value.as_bytes();
    let required = bytes.len() + 1;
    if buffer.len() >= required {
        buffer[..bytes.len()].copy_from_slice(bytes);
        buffer[bytes.len()] = 0;
    }
    required as u32
}
