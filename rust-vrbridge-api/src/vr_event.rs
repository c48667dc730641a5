use crate::vr_gamepad::VRButton;

pub const EVENT_TYPE_BUTTON_PRESS: u32 = 200;
pub const EVENT_TYPE_BUTTON_UNPRESS: u32 = 201;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VREventType {
    ButtonPress,
    ButtonUnpress,
    // Any event the bridge doesn't act on, with its raw runtime type
    Other(u32),
}

impl VREventType {
    pub fn from_raw(raw: u32) -> VREventType {
        match raw {
            EVENT_TYPE_BUTTON_PRESS => VREventType::ButtonPress,
            EVENT_TYPE_BUTTON_UNPRESS => VREventType::ButtonUnpress,
            other => VREventType::Other(other),
        }
    }
}

// One entry drained from the runtime's event queue.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VREvent {
    pub event_type: VREventType,
    pub tracked_device_index: u32,
    pub age_seconds: f32,
    // Only meaningful for button events
    pub button: VRButton,
}

impl VREvent {
    pub fn button_press(tracked_device_index: u32, button: VRButton) -> VREvent {
        VREvent {
            event_type: VREventType::ButtonPress,
            tracked_device_index,
            age_seconds: 0.0,
            button,
        }
    }

    pub fn button_unpress(tracked_device_index: u32, button: VRButton) -> VREvent {
        VREvent {
            event_type: VREventType::ButtonUnpress,
            tracked_device_index,
            age_seconds: 0.0,
            button,
        }
    }
}
