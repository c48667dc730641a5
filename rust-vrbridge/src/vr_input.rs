use crate::vr_pose_predictor::controller_axis;
use rust_vrbridge_api::{VRAxisType, VRButton, VRControllerRole, VREvent, VREventType, VRSettings, VRSystem};

// Engine keys the controllers can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VRKey {
    Ctrl,
    Slash,
    Enter,
    Escape,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
}

// Where the engine currently routes key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRKeyDest {
    Game,
    Console,
    Message,
    Menu,
}

/// The engine side of the input bridge.
pub trait VRInputSink {
    fn key_dest(&self) -> VRKeyDest;

    fn key_event(&mut self, key: VRKey, down: bool);
}

// Movement accumulated into the engine's user command for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VRUserCmd {
    pub forward_move: f32,
    pub side_move: f32,
    pub up_move: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum VRButtonAction {
    Key(VRKey),
    // Emits the direction the thumb is on, outside gameplay only
    Direction(VRAxisType),
}

struct VRButtonBinding {
    role: VRControllerRole,
    button: VRButton,
    action: VRButtonAction,
}

const BUTTON_BINDINGS: [VRButtonBinding; 5] = [
    VRButtonBinding {
        role: VRControllerRole::RightHand,
        button: VRButton::Trigger,
        action: VRButtonAction::Key(VRKey::Ctrl),
    },
    VRButtonBinding {
        role: VRControllerRole::RightHand,
        button: VRButton::ApplicationMenu,
        action: VRButtonAction::Key(VRKey::Slash),
    },
    VRButtonBinding {
        role: VRControllerRole::LeftHand,
        button: VRButton::Trigger,
        action: VRButtonAction::Key(VRKey::Enter),
    },
    VRButtonBinding {
        role: VRControllerRole::LeftHand,
        button: VRButton::Grip,
        action: VRButtonAction::Key(VRKey::Escape),
    },
    VRButtonBinding {
        role: VRControllerRole::LeftHand,
        button: VRButton::Touchpad,
        action: VRButtonAction::Direction(VRAxisType::TrackPad),
    },
];

// Angle ranges in degrees, exclusive below and inclusive above.
// Angles outside every range map to the left arrow.
const DIRECTION_SECTORS: [(f64, f64, VRKey); 3] = [
    (45.0, 135.0, VRKey::UpArrow),
    (-45.0, 45.0, VRKey::RightArrow),
    (-135.0, -45.0, VRKey::DownArrow),
];

/// Quantizes an axis deflection to one of four arrow keys.
///
/// Deflections no longer than `deadzone` produce no key.
pub fn axis_to_direction_key(x: f32, y: f32, deadzone: f32) -> Option<VRKey> {
    if x.hypot(y) <= deadzone {
        return None;
    }

    let angle = (y as f64).atan2(x as f64).to_degrees();
    let key = DIRECTION_SECTORS.iter()
        .find(|&&(above, up_to, _)| angle > above && angle <= up_to)
        .map_or(VRKey::LeftArrow, |&(_, _, key)| key);
    Some(key)
}

/// Translates one runtime event into engine key events.
pub fn dispatch_event<S, I>(system: &S, event: &VREvent, sink: &mut I, deadzone: f32)
    where S: VRSystem, I: VRInputSink
{
    let down = match event.event_type {
        VREventType::ButtonPress => true,
        VREventType::ButtonUnpress => false,
        VREventType::Other(_) => return,
    };

    let role = system.controller_role_for_tracked_device_index(event.tracked_device_index);
    let action = match BUTTON_BINDINGS.iter().find(|b| b.role == role && b.button == event.button) {
        Some(binding) => binding.action,
        None => return,
    };

    match action {
        VRButtonAction::Key(key) => sink.key_event(key, down),
        VRButtonAction::Direction(axis_type) => {
            if sink.key_dest() == VRKeyDest::Game {
                return;
            }
            let axis = match controller_axis(system, role, axis_type) {
                Some(axis) => axis,
                None => {
                    debug!("{:?} controller has no {:?} axis", role, axis_type);
                    return;
                }
            };
            if let Some(key) = axis_to_direction_key(axis.x, axis.y, deadzone) {
                sink.key_event(key, down);
            }
        }
    }
}

/// Drains the runtime's event queue into `sink`.
pub fn process_events<S, I>(system: &S, sink: &mut I, settings: &VRSettings)
    where S: VRSystem, I: VRInputSink
{
    while let Some(event) = system.poll_next_event() {
        dispatch_event(system, &event, sink, settings.key_input_axis_deadzone);
    }
}

/// Adds the left controller's thumb deflection to `cmd`. The track pad is
/// used when the controller has one, the joystick otherwise.
pub fn apply_movement_axis<S: VRSystem>(system: &S, cmd: &mut VRUserCmd, settings: &VRSettings) {
    let axis = controller_axis(system, VRControllerRole::LeftHand, VRAxisType::TrackPad)
        .or_else(|| controller_axis(system, VRControllerRole::LeftHand, VRAxisType::Joystick));

    if let Some(axis) = axis {
        cmd.side_move += settings.side_move_speed * axis.x;
        cmd.forward_move += settings.forward_move_speed * axis.y;
    }
}
