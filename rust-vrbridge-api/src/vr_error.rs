use thiserror::Error;

/// Errors reported by a VR runtime or by the session built on top of it.
///
/// Setup failures (`RuntimeMissing`, `HmdNotPresent`, `Init`, `InterfaceNotFound`,
/// `InterfaceUnavailable`) are fatal for the session. `BufferTooSmall` and
/// `Unavailable` are soft property/query failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VRError {
    #[error("couldn't load VR runtime library: {0}")]
    RuntimeMissing(String),

    #[error("no head mounted display is present")]
    HmdNotPresent,

    #[error("couldn't init VR runtime: {0}")]
    Init(String),

    #[error("VR runtime doesn't provide interface {0}")]
    InterfaceNotFound(String),

    #[error("couldn't get VR {interface} interface: {reason}")]
    InterfaceUnavailable { interface: &'static str, reason: String },

    // Two-call buffer sizing: `required` includes the nul terminator.
    #[error("buffer too small, {required} bytes required")]
    BufferTooSmall { required: u32 },

    #[error("value unavailable")]
    Unavailable,

    #[error("compositor error {0}")]
    Compositor(u32),
}

impl VRError {
    pub fn is_fatal(&self) -> bool {
        match *self {
            VRError::BufferTooSmall { .. } | VRError::Unavailable | VRError::Compositor(_) => false,
            _ => true,
        }
    }
}
