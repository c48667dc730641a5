use crate::{HmdMatrix34, HmdMatrix44, VRControllerRole, VRControllerState, VRError, VREvent, VREye,
            VRHiddenAreaMesh, VRTrackedDevicePose, VRVulkanTextureData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRApplicationType {
    Scene,
    Overlay,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRTrackingOrigin {
    Seated,
    Standing,
    RawAndUncalibrated,
}

// The two runtime interfaces a session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRInterface {
    System,
    Compositor,
}

impl VRInterface {
    pub fn name(self) -> &'static str {
        match self {
            VRInterface::System => "system",
            VRInterface::Compositor => "compositor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRDeviceProperty {
    ManufacturerName,
    ModelNumber,
    DisplayFrequency,
    SecondsFromVsyncToPhotons,
    // Axis type declared for controller axis slot n
    AxisType(u32),
}

/// Handle to the runtime's tracking system interface.
///
/// Handles are cheap to clone and are only valid for the runtime generation
/// they were acquired in.
pub trait VRSystem: Clone {
    fn poll_next_event(&self) -> Option<VREvent>;

    fn controller_state(&self, device_index: u32) -> Option<VRControllerState>;

    fn tracked_device_index_for_controller_role(&self, role: VRControllerRole) -> u32;

    fn controller_role_for_tracked_device_index(&self, device_index: u32) -> VRControllerRole;

    /// Fills `poses` with every tracked device's pose, predicted
    /// `predicted_seconds_to_photons` into the future.
    fn device_to_absolute_tracking_pose(&self,
                                        origin: VRTrackingOrigin,
                                        predicted_seconds_to_photons: f32,
                                        poses: &mut [VRTrackedDevicePose]);

    /// Seconds since the last vsync and the frame counter, if timing is available.
    fn time_since_last_vsync(&self) -> Option<(f32, u64)>;

    fn eye_to_head_transform(&self, eye: VREye) -> HmdMatrix34;

    fn projection_matrix(&self, eye: VREye, near_z: f32, far_z: f32) -> HmdMatrix44;

    fn recommended_render_target_size(&self) -> (u32, u32);

    fn hidden_area_mesh(&self, eye: VREye) -> VRHiddenAreaMesh;

    fn float_property(&self, device_index: u32, property: VRDeviceProperty) -> Result<f32, VRError>;

    fn int32_property(&self, device_index: u32, property: VRDeviceProperty) -> Result<i32, VRError>;

    /// Copies a nul terminated string property into `buffer` and returns its
    /// length including the terminator. A buffer that is too small yields
    /// `VRError::BufferTooSmall` with the required length.
    fn string_property(&self,
                       device_index: u32,
                       property: VRDeviceProperty,
                       buffer: &mut [u8])
                       -> Result<u32, VRError>;
}

/// Handle to the runtime's compositor interface.
pub trait VRCompositor: Clone {
    fn submit(&self, eye: VREye, texture: &VRVulkanTextureData) -> Result<(), VRError>;

    /// Blocks until the compositor is ready for the next frame.
    fn wait_get_poses(&self) -> Result<(), VRError>;

    /// Same sizing convention as `VRSystem::string_property`, but the required
    /// length is always returned and the buffer is only written when it fits.
    fn vulkan_instance_extensions_required(&self, buffer: &mut [u8]) -> u32;

    fn vulkan_device_extensions_required(&self, physical_device: u64, buffer: &mut [u8]) -> u32;
}

/// Entry points of a VR runtime: init/shutdown, the generation token and
/// interface acquisition.
pub trait VRRuntime {
    type System: VRSystem;
    type Compositor: VRCompositor;

    /// Starts the runtime and returns the current generation token.
    fn init(&mut self, application_type: VRApplicationType) -> Result<u32, VRError>;

    /// Changes whenever previously acquired interfaces must be re-acquired.
    fn init_token(&self) -> u32;

    fn is_interface_version_valid(&self, interface: VRInterface) -> bool;

    fn system(&self) -> Result<Self::System, VRError>;

    fn compositor(&self) -> Result<Self::Compositor, VRError>;

    fn shutdown(&mut self);
}
