use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

// Playback cursor for one pad. Plays its bank once, start to end.
#[derive(Clone, Debug, Default)]
pub struct Voice {
    pub pos: usize,
    pub gain: f32,
    pub active: bool,
}

impl Voice {
    pub fn start(&mut self, gain: f32) {
        self.pos = 0;
        self.gain = gain;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.pos = 0;
    }

    // mix this voice into `out`; goes quiet by itself at the end of the bank
    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        if !self.active {
            return;
        }
        for frame in out.iter_mut() {
            let Some(s) = buffer.data.get(self.pos) else {
                self.active = false;
                break;
            };
            frame.left += s.left * self.gain;
            frame.right += s.right * self.gain;
            self.pos += 1;
        }
    }
}
