#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use self::mock::{MockVRCall, MockVRCompositor, MockVRControlMsg, MockVRController, MockVRRuntime,
                     MockVRState, MockVRSystem};

#[cfg(feature = "openvr")]
mod openvr;
#[cfg(feature = "openvr")]
pub use self::openvr::{OpenVRCompositor, OpenVRRuntime, OpenVRSystem};
