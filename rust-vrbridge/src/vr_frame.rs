use rust_vrbridge_api::{matrix34_to_array, matrix44_to_array};
use rust_vrbridge_api::{VRCompositor, VRError, VREye, VREyeParameters, VRFieldOfView, VRHiddenAreaMesh,
                        VRSystem, VRVulkanTextureData};

/// Per-eye render parameters and the submission half of the frame loop.
///
/// Every frame the renderer submits the left eye, then the right eye. The
/// compositor wait that paces the loop follows the right eye's submission.
pub struct VRFramePipeline {
    eyes: [VREyeParameters; 2],
    field_of_view: VRFieldOfView,
    next_eye: VREye,
}

impl VRFramePipeline {
    pub fn new() -> VRFramePipeline {
        VRFramePipeline {
            eyes: [VREyeParameters::new(VREye::Left), VREyeParameters::new(VREye::Right)],
            field_of_view: VRFieldOfView::default(),
            next_eye: VREye::Left,
        }
    }

    pub fn eye(&self, eye: VREye) -> &VREyeParameters {
        &self.eyes[eye.index()]
    }

    pub fn field_of_view(&self) -> VRFieldOfView {
        self.field_of_view
    }

    // The engine's clip space has y pointing down, so the vertical scale is
    // negated before the matrix is laid out column major.
    pub fn compute_projection<S: VRSystem>(&mut self, system: &S, near_z: f32, far_z: f32) {
        for &eye in VREye::ALL.iter() {
            let mut matrix = system.projection_matrix(eye, near_z, far_z);
            matrix[1][1] = -matrix[1][1];
            self.eyes[eye.index()].projection = matrix44_to_array(&matrix);
        }

        self.field_of_view = VRFieldOfView::from_projection(&self.eyes[VREye::Left.index()].projection);
        info!("VR field of view: {} x {} degrees", self.field_of_view.x_degrees, self.field_of_view.y_degrees);
    }

    pub fn compute_eye_to_head<S: VRSystem>(&mut self, system: &S) {
        for &eye in VREye::ALL.iter() {
            let mut transform = matrix34_to_array(&system.eye_to_head_transform(eye));
            transform[3] = 0.0;
            transform[7] = 0.0;
            transform[11] = 0.0;
            transform[15] = 1.0;
            self.eyes[eye.index()].eye_to_head_transform = transform;
        }
    }

    pub fn compute_hidden_area_mesh<S: VRSystem>(&mut self, system: &S) {
        for &eye in VREye::ALL.iter() {
            let mesh = system.hidden_area_mesh(eye);
            debug!("{:?} eye hidden area mesh: {} triangles", eye, mesh.triangle_count);
            self.eyes[eye.index()].hidden_area_mesh = mesh;
        }
    }

    /// Copies the renderer's Vulkan objects into both eyes' texture descriptors.
    /// The image of each eye is kept; it's set per submission.
    pub fn bind_vulkan_texture_data(&mut self, data: &VRVulkanTextureData) {
        for params in self.eyes.iter_mut() {
            let image = params.texture.image;
            params.texture = *data;
            params.texture.image = image;
        }
    }

    /// Hands `eye` to the compositor, rendered into `color_image`.
    ///
    /// After the right eye the call blocks in the compositor until it's time
    /// to start the next frame, whether or not the submission succeeded.
    pub fn submit<C: VRCompositor>(&mut self, compositor: &C, eye: VREye, color_image: u64) -> Result<(), VRError> {
        if eye != self.next_eye {
            debug!("{:?} eye submitted while expecting {:?}", eye, self.next_eye);
        }

        let texture = &mut self.eyes[eye.index()].texture;
        texture.image = color_image;
        let submitted = compositor.submit(eye, texture);

        self.next_eye = match eye {
            VREye::Left => VREye::Right,
            VREye::Right => VREye::Left,
        };

        if eye == VREye::Right {
            compositor.wait_get_poses()?;
        }
        submitted
    }

    /// Calls `draw` for each eye with a non empty hidden area mesh.
    pub fn draw_hidden_area_mesh<F>(&self, mut draw: F)
        where F: FnMut(VREye, &VRHiddenAreaMesh)
    {
        for params in self.eyes.iter() {
            if !params.hidden_area_mesh.is_empty() {
                draw(params.eye, &params.hidden_area_mesh);
            }
        }
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::api::{MockVRCall, MockVRRuntime};
    use rust_vrbridge_api::VRRuntime;

    #[test]
    fn projection_flips_vertical_axis() {
        let runtime = MockVRRuntime::new();
        let system = runtime.system().unwrap();
        let mut frame = VRFramePipeline::new();
        frame.compute_projection(&system, 4.0, 16384.0);

        let left = frame.eye(VREye::Left).projection;
        assert_eq!(left[0], 0.75620246);
        assert_eq!(left[5], -0.68050665);
        assert_eq!(left[8], -0.05713458);
        assert_eq!(left[11], -1.0);
        assert_eq!(left[14], -0.10000999);
        assert_eq!(frame.eye(VREye::Right).projection[5], -0.68069947);

        let fov = frame.field_of_view();
        let expected_x = (1.0f64 / 0.75620246).atan() * 360.0 / std::f64::consts::PI;
        let expected_y = (1.0f64 / 0.68050665).atan() * 360.0 / std::f64::consts::PI;
        assert!((fov.x_degrees as f64 - expected_x).abs() < 1e-3);
        assert!((fov.y_degrees as f64 - expected_y).abs() < 1e-3);
    }

    #[test]
    fn eye_to_head_is_affine() {
        let runtime = MockVRRuntime::new();
        let mut frame = VRFramePipeline::new();
        frame.compute_eye_to_head(&runtime.system().unwrap());

        let left = frame.eye(VREye::Left).eye_to_head_transform;
        assert_eq!([left[3], left[7], left[11], left[15]], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!([left[12], left[13], left[14]], [-0.035949998, 0.0, 0.015]);
        assert_eq!(frame.eye(VREye::Right).eye_to_head_transform[12], 0.035949998);
    }

    #[test]
    fn empty_hidden_area_mesh_is_not_drawn() {
        let runtime = MockVRRuntime::new();
        runtime.state_handle().borrow_mut().hidden_area_meshes[1] = VRHiddenAreaMesh::default();
        let mut frame = VRFramePipeline::new();
        frame.compute_hidden_area_mesh(&runtime.system().unwrap());

        let mut drawn = Vec::new();
        frame.draw_hidden_area_mesh(|eye, mesh| drawn.push((eye, mesh.vertices.len())));
        assert_eq!(drawn, vec![(VREye::Left, 6)]);
    }

    #[test]
    fn binding_texture_data_keeps_images() {
        let runtime = MockVRRuntime::new();
        let compositor = runtime.compositor().unwrap();
        let mut frame = VRFramePipeline::new();
        frame.submit(&compositor, VREye::Left, 7).unwrap();

        let data = VRVulkanTextureData {
            image: 99,
            device: 2,
            width: 1512,
            height: 1680,
            format: 37,
            ..VRVulkanTextureData::default()
        };
        frame.bind_vulkan_texture_data(&data);
        assert_eq!(frame.eye(VREye::Left).texture.image, 7);
        assert_eq!(frame.eye(VREye::Left).texture.device, 2);
        assert_eq!(frame.eye(VREye::Right).texture.width, 1512);
        assert_eq!(frame.eye(VREye::Right).texture.image, 0);
    }

    #[test]
    fn wait_follows_right_eye_even_on_submit_error() {
        let runtime = MockVRRuntime::new();
        runtime.state_handle().borrow_mut().submit_error = Some(108);
        let compositor = runtime.compositor().unwrap();
        let mut frame = VRFramePipeline::new();

        assert_eq!(frame.submit(&compositor, VREye::Left, 1), Err(VRError::Compositor(108)));
        assert_eq!(frame.submit(&compositor, VREye::Right, 2), Err(VRError::Compositor(108)));
        assert_eq!(runtime.state_handle().borrow().frame_calls(),
                   vec![MockVRCall::Submit { eye: VREye::Left, image: 1 },
                        MockVRCall::Submit { eye: VREye::Right, image: 2 },
                        MockVRCall::WaitGetPoses]);
    }
}
