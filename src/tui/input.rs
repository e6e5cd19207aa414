use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use super::mode::TuiState;
use crate::shared::{
    ControlId, FunctionKind, GestureState, InputEvent, PadId, TouchEvent, TouchPhase,
};

// wait up to `timeout` for input, then take everything already queued
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();
    if !event::poll(timeout)? {
        return Ok(out);
    }
    loop {
        out.extend(translate_event(event::read()?, ts));
        if !event::poll(Duration::ZERO)? {
            break;
        }
    }
    Ok(out)
}

pub fn translate_event(ev: Event, ts: &mut TuiState) -> Vec<InputEvent> {
    match ev {
        Event::Key(key) => translate_key(key, ts).into_iter().collect(),
        Event::Mouse(mouse) => translate_mouse(mouse, ts),
        Event::FocusLost => {
            ts.mouse_contact = None;
            vec![InputEvent::CancelAll]
        }
        _ => vec![],
    }
}

fn translate_key(key: KeyEvent, ts: &TuiState) -> Option<InputEvent> {
    if key.code == KeyCode::Esc {
        return (key.kind == KeyEventKind::Press).then_some(InputEvent::Quit);
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };

    if ts.keyboard_enhanced {
        let control = char_to_control(c.to_ascii_lowercase())?;
        let state = match key.kind {
            KeyEventKind::Press => GestureState::Began,
            KeyEventKind::Repeat => GestureState::Active,
            KeyEventKind::Release => GestureState::Ended,
        };
        return Some(InputEvent::Gesture(control, state));
    }

    // no release events: lowercase presses, shifted releases
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if let Some(control) = char_to_control(c) {
        return Some(InputEvent::Gesture(control, GestureState::Began));
    }
    let control = char_to_control(unshift(c))?;
    Some(InputEvent::Gesture(control, GestureState::Ended))
}

fn translate_mouse(mouse: MouseEvent, ts: &mut TuiState) -> Vec<InputEvent> {
    let (x, y) = (mouse.column, mouse.row);
    let touch = |contact, phase| InputEvent::Touch(TouchEvent { contact, phase, x, y });
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let mut out = Vec::new();
            // missed the up for the previous contact
            if let Some(stale) = ts.mouse_contact.take() {
                out.push(touch(stale, TouchPhase::Cancel));
            }
            out.push(touch(ts.begin_contact(), TouchPhase::Start));
            out
        }
        MouseEventKind::Drag(MouseButton::Left) => ts
            .mouse_contact
            .map(|c| touch(c, TouchPhase::Move))
            .into_iter()
            .collect(),
        MouseEventKind::Up(MouseButton::Left) => ts
            .mouse_contact
            .take()
            .map(|c| touch(c, TouchPhase::End))
            .into_iter()
            .collect(),
        _ => vec![],
    }
}

// '!' and '@' are what shift turns 1 and 2 into on most layouts
fn unshift(c: char) -> char {
    match c {
        '!' => '1',
        '@' => '2',
        other => other.to_ascii_lowercase(),
    }
}

fn char_to_control(c: char) -> Option<ControlId> {
    let control = match c {
        '1' => ControlId::Pad(PadId(0)),
        '2' => ControlId::Pad(PadId(1)),
        'q' => ControlId::Pad(PadId(2)),
        'w' => ControlId::Pad(PadId(3)),
        'a' => ControlId::Pad(PadId(4)),
        's' => ControlId::Pad(PadId(5)),
        'r' => ControlId::Function(FunctionKind::Record),
        'h' => ControlId::Function(FunctionKind::Hang),
        'c' => ControlId::Function(FunctionKind::Cut),
        _ => return None,
    };
    Some(control)
}
