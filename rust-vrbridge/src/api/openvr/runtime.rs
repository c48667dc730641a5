use super::library::OpenVRLibrary;
use openvr_sys as openvr;
use std::ffi::CStr;
use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::rc::Rc;
use std::slice;
use crate::{HmdMatrix34, HmdMatrix44, VRApplicationType, VRButton, VRCompositor, VRControllerAxis,
            VRControllerRole, VRControllerState, VRDeviceProperty, VRError, VREvent, VREventType, VREye,
            VRHiddenAreaMesh, VRInterface, VRRuntime, VRSystem, VRTrackedDevicePose, VRTrackingOrigin,
            VRVulkanTextureData, CONTROLLER_STATE_AXIS_COUNT, MAX_TRACKED_DEVICE_POSES};

// OpenVR runtime loaded from openvr_api at run time.
pub struct OpenVRRuntime {
    lib: Rc<OpenVRLibrary>,
}

impl OpenVRRuntime {
    pub fn new() -> Result<OpenVRRuntime, VRError> {
        match unsafe { OpenVRLibrary::new() } {
            Ok(lib) => Ok(OpenVRRuntime { lib: Rc::new(lib) }),
            Err(e) => Err(VRError::RuntimeMissing(e.to_string())),
        }
    }

    fn init_error_description(&self, error: openvr::EVRInitError) -> String {
        let description = unsafe { (*self.lib.init_error_description)(error) };
        if description.is_null() {
            return format!("init error {}", error);
        }
        let description = unsafe { CStr::from_ptr(description) };
        description.to_string_lossy().into_owned()
    }

    fn interface<T>(&self, interface: VRInterface) -> Result<*mut T, VRError> {
        let mut name = b"FnTable:".to_vec();
        name.extend_from_slice(interface_version(interface));

        let mut error = openvr::EVRInitError_VRInitError_None;
        let table = unsafe { (*self.lib.get_interface)(name.as_ptr() as *const c_char, &mut error) } as *mut T;
        if error != openvr::EVRInitError_VRInitError_None || table.is_null() {
            return Err(VRError::InterfaceUnavailable {
                interface: interface.name(),
                reason: self.init_error_description(error),
            });
        }
        Ok(table)
    }
}

impl VRRuntime for OpenVRRuntime {
    type System = OpenVRSystem;
    type Compositor = OpenVRCompositor;

    fn init(&mut self, application_type: VRApplicationType) -> Result<u32, VRError> {
        if !unsafe { (*self.lib.is_hmd_present)() } {
            return Err(VRError::HmdNotPresent);
        }

        let application_type = match application_type {
            VRApplicationType::Scene => openvr::EVRApplicationType_VRApplication_Scene,
            VRApplicationType::Overlay => openvr::EVRApplicationType_VRApplication_Overlay,
            VRApplicationType::Background => openvr::EVRApplicationType_VRApplication_Background,
        };
        let mut error = openvr::EVRInitError_VRInitError_None;
        let token = unsafe { (*self.lib.init_internal)(&mut error, application_type) };
        if error != openvr::EVRInitError_VRInitError_None {
            return Err(VRError::Init(self.init_error_description(error)));
        }
        Ok(token)
    }

    fn init_token(&self) -> u32 {
        unsafe { (*self.lib.get_init_token)() }
    }

    fn is_interface_version_valid(&self, interface: VRInterface) -> bool {
        let version = interface_version(interface);
        unsafe { (*self.lib.is_interface_version_valid)(version.as_ptr() as *const c_char) }
    }

    fn system(&self) -> Result<OpenVRSystem, VRError> {
        Ok(OpenVRSystem {
            _lib: self.lib.clone(),
            table: self.interface(VRInterface::System)?,
        })
    }

    fn compositor(&self) -> Result<OpenVRCompositor, VRError> {
        Ok(OpenVRCompositor {
            _lib: self.lib.clone(),
            table: self.interface(VRInterface::Compositor)?,
        })
    }

    fn shutdown(&mut self) {
        unsafe { (*self.lib.shutdown_internal)() }
    }
}

#[derive(Clone)]
pub struct OpenVRSystem {
    _lib: Rc<OpenVRLibrary>,
    table: *mut openvr::VR_IVRSystem_FnTable,
}

impl VRSystem for OpenVRSystem {
    fn poll_next_event(&self) -> Option<VREvent> {
        let mut event: openvr::VREvent_t = unsafe { mem::zeroed() };
        let pending = unsafe {
            (*self.table).PollNextEvent.unwrap()(&mut event, mem::size_of::<openvr::VREvent_t>() as u32)
        };
        if !pending {
            return None;
        }

        let button = unsafe { event.data.controller.button };
        Some(VREvent {
            event_type: VREventType::from_raw(event.eventType as u32),
            tracked_device_index: event.trackedDeviceIndex,
            age_seconds: event.eventAgeSeconds,
            button: VRButton::from_raw(button),
        })
    }

    fn controller_state(&self, device_index: u32) -> Option<VRControllerState> {
        let mut state: openvr::VRControllerState_t = unsafe { mem::zeroed() };
        let valid = unsafe {
            (*self.table).GetControllerState.unwrap()(device_index,
                                                      &mut state,
                                                      mem::size_of::<openvr::VRControllerState_t>() as u32)
        };
        if !valid {
            return None;
        }

        let raw_axis = state.rAxis;
        let mut axis = [VRControllerAxis::default(); CONTROLLER_STATE_AXIS_COUNT];
        for (out, raw) in axis.iter_mut().zip(raw_axis.iter()) {
            *out = VRControllerAxis { x: raw.x, y: raw.y };
        }
        Some(VRControllerState {
            packet_num: state.unPacketNum,
            button_pressed: state.ulButtonPressed,
            button_touched: state.ulButtonTouched,
            axis,
        })
    }

    fn tracked_device_index_for_controller_role(&self, role: VRControllerRole) -> u32 {
        unsafe {
            (*self.table).GetTrackedDeviceIndexForControllerRole.unwrap()(role.to_raw() as openvr::ETrackedControllerRole)
        }
    }

    fn controller_role_for_tracked_device_index(&self, device_index: u32) -> VRControllerRole {
        let role = unsafe { (*self.table).GetControllerRoleForTrackedDeviceIndex.unwrap()(device_index) };
        VRControllerRole::from_raw(role as u32)
    }

    fn device_to_absolute_tracking_pose(&self,
                                        origin: VRTrackingOrigin,
                                        predicted_seconds_to_photons: f32,
                                        poses: &mut [VRTrackedDevicePose]) {
        let mut raw: [openvr::TrackedDevicePose_t; MAX_TRACKED_DEVICE_POSES] = unsafe { mem::zeroed() };
        let count = poses.len().min(MAX_TRACKED_DEVICE_POSES);
        unsafe {
            (*self.table).GetDeviceToAbsoluteTrackingPose.unwrap()(tracking_origin(origin),
                                                                   predicted_seconds_to_photons,
                                                                   raw.as_mut_ptr(),
                                                                   count as u32);
        }
        for (out, pose) in poses.iter_mut().zip(raw.iter()) {
            *out = tracked_device_pose(pose);
        }
    }

    fn time_since_last_vsync(&self) -> Option<(f32, u64)> {
        let mut seconds = 0.0f32;
        let mut frame_counter = 0u64;
        let available = unsafe { (*self.table).GetTimeSinceLastVsync.unwrap()(&mut seconds, &mut frame_counter) };
        if available {
            Some((seconds, frame_counter))
        } else {
            None
        }
    }

    fn eye_to_head_transform(&self, eye: VREye) -> HmdMatrix34 {
        let matrix = unsafe { (*self.table).GetEyeToHeadTransform.unwrap()(openvr_eye(eye)) };
        matrix.m
    }

    fn projection_matrix(&self, eye: VREye, near_z: f32, far_z: f32) -> HmdMatrix44 {
        let matrix = unsafe { (*self.table).GetProjectionMatrix.unwrap()(openvr_eye(eye), near_z, far_z) };
        matrix.m
    }

    fn recommended_render_target_size(&self) -> (u32, u32) {
        let mut width = 0u32;
        let mut height = 0u32;
        unsafe {
            (*self.table).GetRecommendedRenderTargetSize.unwrap()(&mut width, &mut height);
        }
        (width, height)
    }

    fn hidden_area_mesh(&self, eye: VREye) -> VRHiddenAreaMesh {
        let mesh = unsafe {
            (*self.table).GetHiddenAreaMesh.unwrap()(openvr_eye(eye),
                                                     openvr::EHiddenAreaMeshType_k_eHiddenAreaMesh_Standard)
        };
        if mesh.pVertexData.is_null() || mesh.unTriangleCount == 0 {
            return VRHiddenAreaMesh::default();
        }

        let vertex_count = mesh.unTriangleCount as usize * 3;
        let vertices = unsafe { slice::from_raw_parts(mesh.pVertexData, vertex_count) };
        VRHiddenAreaMesh {
            vertices: vertices.iter().map(|vertex| vertex.v).collect(),
            triangle_count: mesh.unTriangleCount,
        }
    }

    fn float_property(&self, device_index: u32, property: VRDeviceProperty) -> Result<f32, VRError> {
        let mut error = openvr::ETrackedPropertyError_TrackedProp_Success;
        let value = unsafe {
            (*self.table).GetFloatTrackedDeviceProperty.unwrap()(device_index, device_property(property), &mut error)
        };
        property_result(error, value, 0)
    }

    fn int32_property(&self, device_index: u32, property: VRDeviceProperty) -> Result<i32, VRError> {
        let mut error = openvr::ETrackedPropertyError_TrackedProp_Success;
        let value = unsafe {
            (*self.table).GetInt32TrackedDeviceProperty.unwrap()(device_index, device_property(property), &mut error)
        };
        property_result(error, value, 0)
    }

    fn string_property(&self,
                       device_index: u32,
                       property: VRDeviceProperty,
                       buffer: &mut [u8])
                       -> Result<u32, VRError> {
        let mut error = openvr::ETrackedPropertyError_TrackedProp_Success;
        let pointer = if buffer.is_empty() {
            ptr::null_mut()
        } else {
            buffer.as_mut_ptr() as *mut c_char
        };
        let length = unsafe {
            (*self.table).GetStringTrackedDeviceProperty.unwrap()(device_index,
                                                                  device_property(property),
                                                                  pointer,
                                                                  buffer.len() as u32,
                                                                  &mut error)
        };
        property_result(error, length, length)
    }
}

#[derive(Clone)]
pub struct OpenVRCompositor {
    _lib: Rc<OpenVRLibrary>,
    table: *mut openvr::VR_IVRCompositor_FnTable,
}

impl VRCompositor for OpenVRCompositor {
    fn submit(&self, eye: VREye, texture: &VRVulkanTextureData) -> Result<(), VRError> {
        let mut data = openvr::VRVulkanTextureData_t {
            m_nImage: texture.image,
            m_pDevice: texture.device as usize as *mut _,
            m_pPhysicalDevice: texture.physical_device as usize as *mut _,
            m_pInstance: texture.instance as usize as *mut _,
            m_pQueue: texture.queue as usize as *mut _,
            m_nQueueFamilyIndex: texture.queue_family_index,
            m_nWidth: texture.width,
            m_nHeight: texture.height,
            m_nFormat: texture.format,
            m_nSampleCount: texture.sample_count,
        };
        let mut openvr_texture = openvr::Texture_t {
            handle: &mut data as *mut openvr::VRVulkanTextureData_t as *mut c_void,
            eType: openvr::ETextureType_TextureType_Vulkan,
            eColorSpace: openvr::EColorSpace_ColorSpace_Auto,
        };

        let error = unsafe {
            (*self.table).Submit.unwrap()(openvr_eye(eye),
                                          &mut openvr_texture,
                                          ptr::null_mut(),
                                          openvr::EVRSubmitFlags_Submit_Default)
        };
        compositor_result(error)
    }

    fn wait_get_poses(&self) -> Result<(), VRError> {
        let error = unsafe {
            (*self.table).WaitGetPoses.unwrap()(ptr::null_mut(), 0, ptr::null_mut(), 0)
        };
        compositor_result(error)
    }

    fn vulkan_instance_extensions_required(&self, buffer: &mut [u8]) -> u32 {
        let pointer = if buffer.is_empty() { ptr::null_mut() } else { buffer.as_mut_ptr() as *mut c_char };
        unsafe {
            (*self.table).GetVulkanInstanceExtensionsRequired.unwrap()(pointer, buffer.len() as u32)
        }
    }

    fn vulkan_device_extensions_required(&self, physical_device: u64, buffer: &mut [u8]) -> u32 {
        let pointer = if buffer.is_empty() { ptr::null_mut() } else { buffer.as_mut_ptr() as *mut c_char };
        unsafe {
            (*self.table).GetVulkanDeviceExtensionsRequired.unwrap()(physical_device as usize as *mut _,
                                                                     pointer,
                                                                     buffer.len() as u32)
        }
    }
}

fn interface_version(interface: VRInterface) -> &'static [u8] {
    match interface {
        VRInterface::System => &openvr::IVRSystem_Version[..],
        VRInterface::Compositor => &openvr::IVRCompositor_Version[..],
    }
}

fn openvr_eye(eye: VREye) -> openvr::EVREye {
    match eye {
        VREye::Left => openvr::EVREye_Eye_Left,
        VREye::Right => openvr::EVREye_Eye_Right,
    }
}

fn tracking_origin(origin: VRTrackingOrigin) -> openvr::ETrackingUniverseOrigin {
    match origin {
        VRTrackingOrigin::Seated => openvr::ETrackingUniverseOrigin_TrackingUniverseSeated,
        VRTrackingOrigin::Standing => openvr::ETrackingUniverseOrigin_TrackingUniverseStanding,
        VRTrackingOrigin::RawAndUncalibrated => openvr::ETrackingUniverseOrigin_TrackingUniverseRawAndUncalibrated,
    }
}

fn device_property(property: VRDeviceProperty) -> openvr::ETrackedDeviceProperty {
    match property {
        VRDeviceProperty::ManufacturerName => openvr::ETrackedDeviceProperty_Prop_ManufacturerName_String,
        VRDeviceProperty::ModelNumber => openvr::ETrackedDeviceProperty_Prop_ModelNumber_String,
        VRDeviceProperty::DisplayFrequency => openvr::ETrackedDeviceProperty_Prop_DisplayFrequency_Float,
        VRDeviceProperty::SecondsFromVsyncToPhotons => {
            openvr::ETrackedDeviceProperty_Prop_SecondsFromVsyncToPhotons_Float
        }
        VRDeviceProperty::AxisType(slot) => {
            openvr::ETrackedDeviceProperty_Prop_Axis0Type_Int32 + slot as openvr::ETrackedDeviceProperty
        }
    }
}

fn property_result<T>(error: openvr::ETrackedPropertyError, value: T, required: u32) -> Result<T, VRError> {
    if error == openvr::ETrackedPropertyError_TrackedProp_Success {
        Ok(value)
    } else if error == openvr::ETrackedPropertyError_TrackedProp_BufferTooSmall {
        Err(VRError::BufferTooSmall { required })
    } else {
        Err(VRError::Unavailable)
    }
}

fn compositor_result(error: openvr::EVRCompositorError) -> Result<(), VRError> {
    if error == openvr::EVRCompositorError_VRCompositorError_None {
        Ok(())
    } else {
        Err(VRError::Compositor(error as u32))
    }
}

fn tracked_device_pose(pose: &openvr::TrackedDevicePose_t) -> VRTrackedDevicePose {
    VRTrackedDevicePose {
        device_to_absolute_tracking: pose.mDeviceToAbsoluteTracking.m,
        velocity: pose.vVelocity.v,
        angular_velocity: pose.vAngularVelocity.v,
        pose_is_valid: pose.bPoseIsValid,
        device_is_connected: pose.bDeviceIsConnected,
    }
}
