// The board: everything between decoded input and the audio thread.
//
// Input arrives as `InputEvent`s, goes through a press recognizer per control,
// and the resulting begin/end edges drive either a pad controller or a
// function trigger. Whatever audio work falls out is collected in the outbox
// and handed back to the caller in order.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use crate::audio_api::{AudioCommand, AudioEvent, AudioOutbox};
use crate::config::{Config, HangRelease, Routing};
use crate::pads::{ContentState, InteractionMode, PadController, PadRegistry};
use crate::press::{DualEdgeTrigger, Press, PressRecognizer, TouchRouter};
use crate::shared::{
    ControlId, DisplayState, FunctionColor, FunctionKind, GestureState, InputEvent, PadId,
    TouchEvent, TouchPhase, NUM_FUNCTIONS, NUM_PADS,
};

pub struct Board {
    mode: InteractionMode,
    pads: [Rc<PadController>; NUM_PADS],
    registry: PadRegistry,
    pad_presses: [PressRecognizer; NUM_PADS],
    function_presses: [PressRecognizer; NUM_FUNCTIONS],
    triggers: [DualEdgeTrigger<InteractionMode>; NUM_FUNCTIONS],
    router: TouchRouter,
    routing: Routing,
    contacts: HashMap<u64, ControlId>, // which control each live contact started on
    hang_release: HangRelease,
    outbox: AudioOutbox,
    last_error: Option<String>,
}

fn function_index(kind: FunctionKind) -> usize {
    match kind {
        FunctionKind::Record => 0,
        FunctionKind::Hang => 1,
        FunctionKind::Cut => 2,
    }
}

fn toggle_action(kind: FunctionKind) -> fn(&mut InteractionMode) {
    match kind {
        FunctionKind::Record => InteractionMode::toggle_select_mode,
        FunctionKind::Hang => InteractionMode::toggle_hanging,
        FunctionKind::Cut => InteractionMode::toggle_cutting,
    }
}

impl Board {
    pub fn new(config: &Config) -> Self {
        let pads: [Rc<PadController>; NUM_PADS] =
            std::array::from_fn(|i| Rc::new(PadController::new(PadId(i as u8))));
        let mut registry = PadRegistry::new();
        for pad in &pads {
            registry.mount(pad);
        }
        let threshold = config.hold_threshold();
        Self {
            mode: InteractionMode::default(),
            pads,
            registry,
            pad_presses: std::array::from_fn(|_| PressRecognizer::new(config.move_tolerance)),
            function_presses: std::array::from_fn(|_| {
                PressRecognizer::new(config.move_tolerance)
            }),
            triggers: FunctionKind::ALL.map(|k| DualEdgeTrigger::new(toggle_action(k), threshold)),
            router: TouchRouter::new(),
            routing: config.routing,
            contacts: HashMap::new(),
            hang_release: config.hang_release,
            outbox: AudioOutbox::new(),
            last_error: None,
        }
    }

    #[cfg(test)]
    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    #[cfg(test)]
    pub fn pad_state(&self, id: PadId) -> Option<ContentState> {
        self.pads.get(id.index()).map(|p| p.state())
    }

    // the TUI re-registers hit regions here whenever the layout changes
    pub fn router_mut(&mut self) -> &mut TouchRouter {
        &mut self.router
    }

    fn recognizer(&mut self, control: ControlId) -> Option<&mut PressRecognizer> {
        match control {
            ControlId::Pad(id) => self.pad_presses.get_mut(id.index()),
            ControlId::Function(kind) => self.function_presses.get_mut(function_index(kind)),
        }
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Vec<AudioCommand> {
        match event {
            InputEvent::Gesture(control, state) => self.gesture(control, state, now),
            InputEvent::Touch(touch) => self.touch(touch, now),
            InputEvent::CancelAll => self.cancel_all(now),
            InputEvent::Quit => {}
        }
        self.outbox.drain()
    }

    fn gesture(&mut self, control: ControlId, state: GestureState, now: Instant) {
        let Some(edge) = self.recognizer(control).and_then(|r| r.feed(state)) else {
            return;
        };
        // a fresh press dismisses the last failure from the status line
        if edge == Press::Begin {
            self.last_error = None;
        }
        match (control, edge) {
            (ControlId::Pad(id), Press::Begin) => self.pad_begin(id),
            (ControlId::Pad(id), Press::End) => self.pad_end(id),
            (ControlId::Function(kind), Press::Begin) => self.function_begin(kind, now),
            (ControlId::Function(kind), Press::End) => self.function_end(kind, now),
        }
    }

    // A pointer contact belongs to the control under its first touch, and its
    // end or cancel goes there wherever the pointer is by then. Gesture routing
    // also fails the press once the contact drifts too far; tree routing
    // ignores travel.
    fn touch(&mut self, touch: TouchEvent, now: Instant) {
        match touch.phase {
            TouchPhase::Start => {
                let Some(control) = self.router.resolve(touch.x, touch.y) else {
                    return;
                };
                self.contacts.insert(touch.contact, control);
                if let Some(r) = self.recognizer(control) {
                    r.anchor(touch.x, touch.y);
                }
                self.gesture(control, GestureState::Began, now);
            }
            TouchPhase::Move if self.routing == Routing::Tree => {}
            TouchPhase::Move => {
                let Some(&control) = self.contacts.get(&touch.contact) else {
                    return;
                };
                let state = self
                    .recognizer(control)
                    .map_or(GestureState::Active, |r| r.motion(touch.x, touch.y));
                if state != GestureState::Active {
                    self.contacts.remove(&touch.contact);
                }
                self.gesture(control, state, now);
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if let Some(control) = self.contacts.remove(&touch.contact) {
                    let state = if touch.phase == TouchPhase::End {
                        GestureState::Ended
                    } else {
                        GestureState::Cancelled
                    };
                    self.gesture(control, state, now);
                }
            }
        }
    }

    fn cancel_all(&mut self, now: Instant) {
        self.contacts.clear();
        for kind in FunctionKind::ALL {
            self.gesture(ControlId::Function(kind), GestureState::Cancelled, now);
        }
        for i in 0..NUM_PADS {
            self.gesture(ControlId::Pad(PadId(i as u8)), GestureState::Cancelled, now);
        }
    }

    fn pad_begin(&mut self, id: PadId) {
        if let Some(pad) = self.pads.get(id.index()) {
            pad.on_press_begin(&mut self.mode, &self.registry, &mut self.outbox);
        }
    }

    fn pad_end(&mut self, id: PadId) {
        if let Some(pad) = self.pads.get(id.index()) {
            pad.on_press_end(&mut self.mode, &mut self.outbox);
        }
    }

    fn function_begin(&mut self, kind: FunctionKind, now: Instant) {
        let was_hanging = self.mode.hanging;
        self.triggers[function_index(kind)].on_begin(&mut self.mode, now);
        self.after_toggle(was_hanging);
    }

    fn function_end(&mut self, kind: FunctionKind, now: Instant) {
        let was_hanging = self.mode.hanging;
        self.triggers[function_index(kind)].on_end(&mut self.mode, now);
        self.after_toggle(was_hanging);
    }

    // hanging just switched off: let go of pads nobody is holding
    fn after_toggle(&mut self, was_hanging: bool) {
        if !was_hanging || self.mode.hanging || self.hang_release == HangRelease::Keep {
            return;
        }
        for (pad, press) in self.pads.iter().zip(self.pad_presses.iter()) {
            if !press.is_pressed() && pad.state() == ContentState::Playing {
                log::debug!("releasing latched pad {}", pad.id().0);
                pad.cut_audio(&mut self.outbox);
            }
        }
    }

    pub fn on_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::Started { pad, ticket, .. } => {
                if let Some(p) = self.registry.get(pad) {
                    p.on_start_confirmed(ticket);
                }
            }
            AudioEvent::Failed { pad, ticket, kind, error } => {
                let Some(p) = self.registry.get(pad) else { return };
                if p.on_start_failed(ticket, &mut self.mode) {
                    log::warn!("pad {} {:?} failed, rolled back: {}", pad.0, kind, error);
                    self.last_error = Some(format!("PAD {}: {}", pad.0 + 1, error));
                }
            }
        }
    }

    fn function_color(&self, kind: FunctionKind) -> FunctionColor {
        let m = &self.mode;
        match kind {
            FunctionKind::Record if m.recording_in_progress || m.selecting_bank_to_record => {
                FunctionColor::Red
            }
            FunctionKind::Hang if m.hanging => FunctionColor::Blue,
            FunctionKind::Cut if m.cutting => FunctionColor::Purple,
            _ => FunctionColor::White,
        }
    }

    pub fn display_state(&self) -> DisplayState {
        let display_text = match &self.last_error {
            Some(err) => err.clone(),
            None if self.mode.recording_in_progress => String::from("RECORDING"),
            None if self.mode.selecting_bank_to_record => String::from("PICK A PAD"),
            None => String::from("READY"),
        };
        DisplayState {
            pads: std::array::from_fn(|i| self.pads[i].color(&self.mode)),
            pads_pressed: std::array::from_fn(|i| self.pad_presses[i].is_pressed()),
            functions: FunctionKind::ALL.map(|k| self.function_color(k)),
            display_text,
        }
    }
}
