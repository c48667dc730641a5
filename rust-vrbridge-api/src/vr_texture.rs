// Texture descriptor handed to the compositor for one eye.
// Vulkan objects are carried as raw handle values; the renderer owns them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRVulkanTextureData {
    // VkImage, rebound every frame
    pub image: u64,
    // VkDevice
    pub device: u64,
    // VkPhysicalDevice
    pub physical_device: u64,
    // VkInstance
    pub instance: u64,
    // VkQueue
    pub queue: u64,
    pub queue_family_index: u32,
    pub width: u32,
    pub height: u32,
    // VkFormat
    pub format: u32,
    pub sample_count: u32,
}

impl Default for VRVulkanTextureData {
    fn default() -> VRVulkanTextureData {
        VRVulkanTextureData {
            image: 0,
            device: 0,
            physical_device: 0,
            instance: 0,
            queue: 0,
            queue_family_index: 0,
            width: 0,
            height: 0,
            format: 0,
            sample_count: 1,
        }
    }
}
