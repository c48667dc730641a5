use crate::vr_context::VRContext;
use crate::vr_frame::VRFramePipeline;
use crate::vr_input::{self, VRInputSink, VRUserCmd};
use crate::vr_pose_predictor::{self, VRPosePredictor};
use rust_vrbridge_api::utils;
use rust_vrbridge_api::{VRApplicationType, VRAxisType, VRCompositor, VRControllerAxis, VRControllerRole,
                        VRDeviceProperty, VREulerAngles, VRError, VREye, VREyeParameters, VRFieldOfView,
                        VRHiddenAreaMesh, VRInterface, VRRuntime, VRSettings, VRSystem,
                        VRTrackedDevicePose, VRTrackedDevicePoses, VRVulkanTextureData,
                        TRACKED_DEVICE_INDEX_HMD};

/// A running VR session: owns the runtime for its whole lifetime.
///
/// Per frame the engine calls `update_poses`, `process_events` and
/// `input_move`, renders both eyes, then calls `submit` for the left eye and
/// the right eye in that order. The runtime is shut down by `shutdown` or
/// when the session is dropped.
pub struct VRSession<R: VRRuntime> {
    context: VRContext<R>,
    settings: VRSettings,
    predictor: VRPosePredictor,
    frame: VRFramePipeline,
    render_target_size: (u32, u32),
}

impl<R: VRRuntime> VRSession<R> {
    pub fn new(mut runtime: R, settings: VRSettings) -> Result<VRSession<R>, VRError> {
        info!("VR Initialization");

        let token = runtime.init(VRApplicationType::Scene).map_err(|e| {
            error!("{}", e);
            e
        })?;

        // From here on dropping the session shuts the runtime down
        let mut session = VRSession {
            context: VRContext::new(runtime, token),
            settings,
            predictor: VRPosePredictor::new(),
            frame: VRFramePipeline::new(),
            render_target_size: (0, 0),
        };
        session.setup()?;
        Ok(session)
    }

    fn setup(&mut self) -> Result<(), VRError> {
        for &interface in [VRInterface::System, VRInterface::Compositor].iter() {
            if !self.context.runtime().is_interface_version_valid(interface) {
                error!("VR runtime doesn't provide a compatible {} interface", interface.name());
                return Err(VRError::InterfaceNotFound(interface.name().into()));
            }
        }

        let system = self.context.system()?;
        self.context.compositor()?;

        if let Some(vendor) = string_property(&system, TRACKED_DEVICE_INDEX_HMD, VRDeviceProperty::ManufacturerName) {
            info!("HMD vendor: {}", vendor);
        }
        if let Some(model) = string_property(&system, TRACKED_DEVICE_INDEX_HMD, VRDeviceProperty::ModelNumber) {
            info!("HMD model: {}", model);
        }

        self.render_target_size = system.recommended_render_target_size();
        info!("Recommended render target size: {} x {}", self.render_target_size.0, self.render_target_size.1);

        self.frame.compute_projection(&system, self.settings.near_z, self.settings.far_z);
        self.frame.compute_eye_to_head(&system);
        self.frame.compute_hidden_area_mesh(&system);

        Ok(())
    }

    pub fn settings(&self) -> &VRSettings {
        &self.settings
    }

    pub fn runtime(&self) -> &R {
        self.context.runtime()
    }

    pub fn is_active(&self) -> bool {
        !self.context.is_shut_down()
    }

    pub fn render_target_size(&self) -> (u32, u32) {
        self.render_target_size
    }

    pub fn field_of_view(&self) -> VRFieldOfView {
        self.frame.field_of_view()
    }

    pub fn eye(&self, eye: VREye) -> &VREyeParameters {
        self.frame.eye(eye)
    }

    pub fn device_string_property(&mut self, device_index: u32, property: VRDeviceProperty) -> Option<String> {
        let system = self.context.system().ok()?;
        string_property(&system, device_index, property)
    }

    /// Refreshes every tracked device's pose for the frame about to be rendered.
    pub fn update_poses(&mut self) -> Result<(), VRError> {
        let system = self.context.system()?;
        self.predictor.update(&system, &self.settings);
        Ok(())
    }

    pub fn poses(&self) -> &VRTrackedDevicePoses {
        self.predictor.poses()
    }

    pub fn predicted_seconds_to_photons(&self) -> f32 {
        self.predictor.predicted_seconds_to_photons()
    }

    pub fn hmd_pose(&self) -> &VRTrackedDevicePose {
        self.predictor.hmd_pose()
    }

    // HMD position in meters, tracking space. None while the HMD isn't tracked.
    pub fn hmd_position(&self) -> Option<[f32; 3]> {
        let pose = self.predictor.hmd_pose();
        if pose.pose_is_valid {
            Some(pose.position())
        } else {
            None
        }
    }

    pub fn hmd_orientation(&self) -> Option<VREulerAngles> {
        let pose = self.predictor.hmd_pose();
        if pose.pose_is_valid {
            Some(pose.orientation())
        } else {
            None
        }
    }

    pub fn controller_pose(&mut self, role: VRControllerRole) -> Result<Option<VRTrackedDevicePose>, VRError> {
        let system = self.context.system()?;
        Ok(self.predictor.controller_pose(&system, role))
    }

    pub fn controller_axis(&mut self,
                           role: VRControllerRole,
                           axis_type: VRAxisType)
                           -> Result<Option<VRControllerAxis>, VRError> {
        let system = self.context.system()?;
        Ok(vr_pose_predictor::controller_axis(&system, role, axis_type))
    }

    pub fn process_events<I: VRInputSink>(&mut self, sink: &mut I) -> Result<(), VRError> {
        let system = self.context.system()?;
        vr_input::process_events(&system, sink, &self.settings);
        Ok(())
    }

    pub fn input_move(&mut self, cmd: &mut VRUserCmd) -> Result<(), VRError> {
        let system = self.context.system()?;
        vr_input::apply_movement_axis(&system, cmd, &self.settings);
        Ok(())
    }

    pub fn bind_vulkan_texture_data(&mut self, data: &VRVulkanTextureData) {
        self.frame.bind_vulkan_texture_data(data);
    }

    /// Submits one eye's color image. Submitting the right eye also waits for
    /// the compositor, which paces the frame loop.
    pub fn submit(&mut self, eye: VREye, color_image: u64) -> Result<(), VRError> {
        let compositor = self.context.compositor()?;
        self.frame.submit(&compositor, eye, color_image)
    }

    pub fn draw_hidden_area_mesh<F>(&self, draw: F)
        where F: FnMut(VREye, &VRHiddenAreaMesh)
    {
        self.frame.draw_hidden_area_mesh(draw)
    }

    pub fn vulkan_instance_extensions_required(&mut self) -> Result<Vec<String>, VRError> {
        let compositor = self.context.compositor()?;
        extension_list(|buffer| compositor.vulkan_instance_extensions_required(buffer))
    }

    pub fn vulkan_device_extensions_required(&mut self, physical_device: u64) -> Result<Vec<String>, VRError> {
        let compositor = self.context.compositor()?;
        extension_list(|buffer| compositor.vulkan_device_extensions_required(physical_device, buffer))
    }

    /// Shuts the runtime down and forgets every pose and eye parameter read
    /// from it. Calling it again does nothing.
    pub fn shutdown(&mut self) {
        self.context.shutdown();
        self.predictor = VRPosePredictor::new();
        self.frame = VRFramePipeline::new();
        self.render_target_size = (0, 0);
    }
}

impl<R: VRRuntime> Drop for VRSession<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// Two-call string fetch: size query, then fill. Missing, empty or changed
// values yield None.
fn string_property<S: VRSystem>(system: &S, device_index: u32, property: VRDeviceProperty) -> Option<String> {
    let required = match system.string_property(device_index, property, &mut []) {
        Err(VRError::BufferTooSmall { required }) if required > 0 => required,
        _ => return None,
    };

    let mut buffer = vec![0u8; required as usize];
    match system.string_property(device_index, property, &mut buffer) {
        Ok(length) if length == required => utils::string_from_buffer(&buffer),
        Ok(length) => {
            debug!("{:?} length changed from {} to {} between reads", property, required, length);
            None
        }
        Err(e) => {
            debug!("Couldn't read {:?}: {}", property, e);
            None
        }
    }
}

fn extension_list<F>(query: F) -> Result<Vec<String>, VRError>
    where F: Fn(&mut [u8]) -> u32
{
    let required = query(&mut []);
    if required == 0 {
        return Ok(Vec::new());
    }

    let mut buffer = vec![0u8; required as usize];
    if query(&mut buffer) != required {
        return Err(VRError::Unavailable);
    }
    let names = utils::string_from_buffer(&buffer).unwrap_or_default();
    Ok(utils::split_extension_names(&names))
}
