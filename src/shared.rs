// The input plan:
//
// Pads (two columns, three rows, same as the phone layout):
//   1 2           //  slots 0 1
//   q w           //  slots 2 3
//   a s           //  slots 4 5
//
// Function controls (tap = toggle, hold = enabled while held):
//   r             //  record / bank select
//   h             //  hang
//   c             //  cut
//
// With keyboard enhancement the terminal reports real press/release. Without
// it, lowercase is a press and uppercase (shift) is a release.
//
// Quit:
//   Esc
//
// Rendering works the same as always: the board owns every bit of state and
// the TUI only draws the `DisplayState` it hands out each frame.

pub const NUM_PADS: usize = 6;
pub const NUM_FUNCTIONS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PadId(pub u8);

impl PadId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Record,
    Hang,
    Cut,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; NUM_FUNCTIONS] =
        [FunctionKind::Record, FunctionKind::Hang, FunctionKind::Cut];

    pub fn label(self) -> &'static str {
        match self {
            FunctionKind::Record => "REC",
            FunctionKind::Hang => "HANG",
            FunctionKind::Cut => "CUT",
        }
    }
}

// anything that can be pressed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlId {
    Pad(PadId),
    Function(FunctionKind),
}

// Low-level gesture states, one stream per control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Began,
    Active,
    Cancelled,
    Ended,
    Failed,
}

// Raw contact events for the tree-routed strategy. `x`/`y` are terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchEvent {
    pub contact: u64,
    pub phase: TouchPhase,
    pub x: u16,
    pub y: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // a gesture state addressed straight to one control (keys, gesture-routed mouse)
    Gesture(ControlId, GestureState),
    // a raw contact that still needs to be resolved to a control
    Touch(TouchEvent),
    // focus lost etc: every held control is cancelled
    CancelAll,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadColor {
    Default,
    Red,
    Yellow,
    Green,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionColor {
    White,
    Red,
    Blue,
    Purple,
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub pads: [PadColor; NUM_PADS],
    pub pads_pressed: [bool; NUM_PADS],
    pub functions: [FunctionColor; NUM_FUNCTIONS],
    pub display_text: String, // status line, last error or current mode summary
}
