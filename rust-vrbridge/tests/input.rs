extern crate rust_vrbridge;

use rust_vrbridge::api::{MockVRControlMsg, MockVRController, MockVRRuntime};
use rust_vrbridge::{VRAxisType, VRButton, VRControllerAxis, VRControllerRole, VREvent, VREventType,
                    VRInputSink, VRKey, VRKeyDest, VRSession, VRSettings, VRUserCmd};

const LEFT_HAND: u32 = 1;
const RIGHT_HAND: u32 = 2;

struct RecordingSink {
    key_dest: VRKeyDest,
    keys: Vec<(VRKey, bool)>,
}

impl RecordingSink {
    fn new(key_dest: VRKeyDest) -> RecordingSink {
        RecordingSink { key_dest, keys: Vec::new() }
    }
}

impl VRInputSink for RecordingSink {
    fn key_dest(&self) -> VRKeyDest {
        self.key_dest
    }

    fn key_event(&mut self, key: VRKey, down: bool) {
        self.keys.push((key, down));
    }
}

fn session() -> VRSession<MockVRRuntime> {
    VRSession::new(MockVRRuntime::new(), VRSettings::default()).unwrap()
}

fn press(session: &VRSession<MockVRRuntime>, device_index: u32, button: VRButton) {
    session.runtime().handle_msg(MockVRControlMsg::QueueEvent(VREvent::button_press(device_index, button)));
}

fn release(session: &VRSession<MockVRRuntime>, device_index: u32, button: VRButton) {
    session.runtime().handle_msg(MockVRControlMsg::QueueEvent(VREvent::button_unpress(device_index, button)));
}

fn set_left_axis(session: &VRSession<MockVRRuntime>, slot: usize, x: f32, y: f32) {
    session.runtime().handle_msg(MockVRControlMsg::SetAxis(VRControllerRole::LeftHand, slot,
                                                           VRControllerAxis { x, y }));
}

#[test]
fn buttons_map_to_keys() {
    let mut session = session();
    press(&session, RIGHT_HAND, VRButton::Trigger);
    release(&session, RIGHT_HAND, VRButton::Trigger);
    press(&session, RIGHT_HAND, VRButton::ApplicationMenu);
    press(&session, LEFT_HAND, VRButton::Trigger);
    press(&session, LEFT_HAND, VRButton::Grip);

    let mut sink = RecordingSink::new(VRKeyDest::Game);
    session.process_events(&mut sink).unwrap();
    assert_eq!(sink.keys, vec![(VRKey::Ctrl, true),
                               (VRKey::Ctrl, false),
                               (VRKey::Slash, true),
                               (VRKey::Enter, true),
                               (VRKey::Escape, true)]);
}

#[test]
fn unbound_buttons_and_events_are_ignored() {
    let mut session = session();
    press(&session, RIGHT_HAND, VRButton::Grip);
    press(&session, LEFT_HAND, VRButton::ApplicationMenu);
    press(&session, 7, VRButton::Trigger);
    let mut event = VREvent::button_press(RIGHT_HAND, VRButton::Trigger);
    event.event_type = VREventType::Other(100);
    session.runtime().handle_msg(MockVRControlMsg::QueueEvent(event));

    let mut sink = RecordingSink::new(VRKeyDest::Game);
    session.process_events(&mut sink).unwrap();
    assert!(sink.keys.is_empty());
    assert!(session.runtime().state_handle().borrow().events.is_empty());
}

#[test]
fn touchpad_click_is_ignored_during_gameplay() {
    let mut session = session();
    set_left_axis(&session, 0, 0.0, 0.9);
    press(&session, LEFT_HAND, VRButton::Touchpad);

    let mut sink = RecordingSink::new(VRKeyDest::Game);
    session.process_events(&mut sink).unwrap();
    assert!(sink.keys.is_empty());
}

#[test]
fn touchpad_click_navigates_menus() {
    let mut session = session();
    let mut sink = RecordingSink::new(VRKeyDest::Menu);

    for &(x, y, key) in [(0.0, 0.31, VRKey::UpArrow),
                         (0.31, 0.0, VRKey::RightArrow),
                         (-0.31, 0.0, VRKey::LeftArrow),
                         (0.0, -0.31, VRKey::DownArrow),
                         (0.25, 0.25, VRKey::RightArrow),
                         (-0.25, 0.25, VRKey::UpArrow)].iter() {
        set_left_axis(&session, 0, x, y);
        press(&session, LEFT_HAND, VRButton::Touchpad);
        release(&session, LEFT_HAND, VRButton::Touchpad);
        session.process_events(&mut sink).unwrap();
        assert_eq!(sink.keys, vec![(key, true), (key, false)]);
        sink.keys.clear();
    }
}

#[test]
fn touchpad_click_inside_deadzone() {
    let mut session = session();
    set_left_axis(&session, 0, 0.3, 0.0);
    press(&session, LEFT_HAND, VRButton::Touchpad);

    let mut sink = RecordingSink::new(VRKeyDest::Console);
    session.process_events(&mut sink).unwrap();
    assert!(sink.keys.is_empty());
}

#[test]
fn movement_follows_track_pad() {
    let mut session = session();
    set_left_axis(&session, 0, 0.5, -0.25);

    let mut cmd = VRUserCmd { forward_move: 10.0, side_move: 0.0, up_move: 0.0 };
    session.input_move(&mut cmd).unwrap();
    assert_eq!(cmd, VRUserCmd { forward_move: -40.0, side_move: 100.0, up_move: 0.0 });
}

#[test]
fn movement_falls_back_to_joystick() {
    let mut session = session();
    let mut controller = MockVRController::new(LEFT_HAND, [VRAxisType::Trigger, VRAxisType::Joystick,
                                                           VRAxisType::None, VRAxisType::None,
                                                           VRAxisType::None]);
    controller.state.axis[1] = VRControllerAxis { x: -1.0, y: 0.5 };
    session.runtime().handle_msg(MockVRControlMsg::SetController(VRControllerRole::LeftHand, controller));

    let mut cmd = VRUserCmd::default();
    session.input_move(&mut cmd).unwrap();
    assert_eq!(cmd.side_move, -200.0);
    assert_eq!(cmd.forward_move, 100.0);
}

#[test]
fn movement_without_left_controller() {
    let mut session = session();
    session.runtime().state_handle().borrow_mut().controllers.remove(&VRControllerRole::LeftHand);

    let mut cmd = VRUserCmd::default();
    session.input_move(&mut cmd).unwrap();
    assert_eq!(cmd, VRUserCmd::default());
}

#[test]
fn movement_speeds_come_from_settings() {
    let mut settings = VRSettings::default();
    settings.side_move_speed = 50.0;
    settings.forward_move_speed = 400.0;
    let mut session = VRSession::new(MockVRRuntime::new(), settings).unwrap();
    set_left_axis(&session, 0, 1.0, 1.0);

    let mut cmd = VRUserCmd::default();
    session.input_move(&mut cmd).unwrap();
    assert_eq!(cmd.side_move, 50.0);
    assert_eq!(cmd.forward_move, 400.0);
}

#[test]
fn controller_queries() {
    let mut session = session();
    set_left_axis(&session, 0, 0.1, 0.2);
    assert_eq!(session.controller_axis(VRControllerRole::LeftHand, VRAxisType::TrackPad).unwrap(),
               Some(VRControllerAxis { x: 0.1, y: 0.2 }));
    assert_eq!(session.controller_axis(VRControllerRole::LeftHand, VRAxisType::Joystick).unwrap(), None);

    session.update_poses().unwrap();
    assert_eq!(session.controller_pose(VRControllerRole::RightHand).unwrap(), None);
}
