// state local to the tui: how keys should be read, and which mouse contact is live
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    // terminal reports real press/release/repeat; otherwise shift = release
    pub keyboard_enhanced: bool,
    // one mouse pointer, so at most one live contact; ids keep counting up
    pub mouse_contact: Option<u64>,
    pub next_contact: u64,
}

impl TuiState {
    pub fn new(keyboard_enhanced: bool) -> Self {
        Self {
            keyboard_enhanced,
            ..Self::default()
        }
    }

    pub fn begin_contact(&mut self) -> u64 {
        self.next_contact += 1;
        self.mouse_contact = Some(self.next_contact);
        self.next_contact
    }
}
