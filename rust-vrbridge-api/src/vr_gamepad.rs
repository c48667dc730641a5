pub const CONTROLLER_STATE_AXIS_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRControllerRole {
    Invalid,
    LeftHand,
    RightHand,
}

impl VRControllerRole {
    pub fn from_raw(raw: u32) -> VRControllerRole {
        match raw {
            1 => VRControllerRole::LeftHand,
            2 => VRControllerRole::RightHand,
            _ => VRControllerRole::Invalid,
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            VRControllerRole::Invalid => 0,
            VRControllerRole::LeftHand => 1,
            VRControllerRole::RightHand => 2,
        }
    }
}

// Button ids as reported in button press/unpress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRButton {
    System,
    ApplicationMenu,
    Grip,
    // Axis0 click
    Touchpad,
    // Axis1 click
    Trigger,
    Other(u32),
}

impl VRButton {
    pub fn from_raw(raw: u32) -> VRButton {
        match raw {
            0 => VRButton::System,
            1 => VRButton::ApplicationMenu,
            2 => VRButton::Grip,
            32 => VRButton::Touchpad,
            33 => VRButton::Trigger,
            other => VRButton::Other(other),
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            VRButton::System => 0,
            VRButton::ApplicationMenu => 1,
            VRButton::Grip => 2,
            VRButton::Touchpad => 32,
            VRButton::Trigger => 33,
            VRButton::Other(raw) => raw,
        }
    }

    pub fn mask(self) -> u64 {
        1u64 << (self.to_raw() & 63)
    }
}

// What a controller declares each of its axis slots to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRAxisType {
    None,
    TrackPad,
    Joystick,
    Trigger,
}

impl VRAxisType {
    pub fn from_raw(raw: i32) -> VRAxisType {
        match raw {
            1 => VRAxisType::TrackPad,
            2 => VRAxisType::Joystick,
            3 => VRAxisType::Trigger,
            _ => VRAxisType::None,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            VRAxisType::None => 0,
            VRAxisType::TrackPad => 1,
            VRAxisType::Joystick => 2,
            VRAxisType::Trigger => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRControllerAxis {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRControllerState {
    pub packet_num: u32,
    pub button_pressed: u64,
    pub button_touched: u64,
    pub axis: [VRControllerAxis; CONTROLLER_STATE_AXIS_COUNT],
}

impl VRControllerState {
    pub fn is_pressed(&self, button: VRButton) -> bool {
        self.button_pressed & button.mask() != 0
    }

    pub fn is_touched(&self, button: VRButton) -> bool {
        self.button_touched & button.mask() != 0
    }
}
