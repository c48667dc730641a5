use crate::vr_texture::VRVulkanTextureData;

// Eyes are processed in declaration order every frame: left, then right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VREye {
    Left,
    Right,
}

impl VREye {
    pub const ALL: [VREye; 2] = [VREye::Left, VREye::Right];

    pub fn index(self) -> usize {
        match self {
            VREye::Left => 0,
            VREye::Right => 1,
        }
    }
}

/// Per-eye mask of pixels that can't be seen through the lens.
///
/// `vertices` is a triangle list, three vertices per triangle, in normalized
/// [0, 1] viewport coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRHiddenAreaMesh {
    pub vertices: Vec<[f32; 2]>,
    pub triangle_count: u32,
}

impl VRHiddenAreaMesh {
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }
}

// Everything the renderer needs to draw and submit one eye.
#[derive(Debug, Clone)]
pub struct VREyeParameters {
    pub eye: VREye,

    // Column major projection, vertical axis flipped for the engine
    pub projection: [f32; 16],

    // Column major eye to head offset, affine
    pub eye_to_head_transform: [f32; 16],

    // Rebound to the frame's color image on every submission
    pub texture: VRVulkanTextureData,

    pub hidden_area_mesh: VRHiddenAreaMesh,
}

impl VREyeParameters {
    pub fn new(eye: VREye) -> VREyeParameters {
        VREyeParameters {
            eye,
            projection: identity_matrix!(),
            eye_to_head_transform: identity_matrix!(),
            texture: VRVulkanTextureData::default(),
            hidden_area_mesh: VRHiddenAreaMesh::default(),
        }
    }
}
