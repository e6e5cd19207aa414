/// Session-wide modes shared by every pad. One instance per board, handed to
/// controllers by reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionMode {
    pub selecting_bank_to_record: bool,
    pub cutting: bool,
    pub hanging: bool,
    // true while some pad is recording
    pub recording_in_progress: bool,
}

impl InteractionMode {
    // refused while a recording is running; the recording pad's release ends it
    pub fn toggle_select_mode(&mut self) {
        if self.recording_in_progress {
            log::debug!("bank select ignored, recording in progress");
            return;
        }
        self.selecting_bank_to_record = !self.selecting_bank_to_record;
        log::debug!("bank select -> {}", self.selecting_bank_to_record);
    }

    pub fn toggle_cutting(&mut self) {
        self.cutting = !self.cutting;
        log::debug!("cutting -> {}", self.cutting);
    }

    pub fn toggle_hanging(&mut self) {
        self.hanging = !self.hanging;
        log::debug!("hanging -> {}", self.hanging);
    }

    // a pad claimed the bank select and started recording
    pub fn claim_bank(&mut self) {
        self.selecting_bank_to_record = false;
        self.recording_in_progress = true;
    }

    pub fn finish_recording(&mut self) {
        self.recording_in_progress = false;
    }
}
