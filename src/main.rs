mod shared;
mod tui;
mod audio_api;
mod audio;
mod config;
mod logging;
mod middle;
mod pads;
mod press;
mod readiness;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use audio::AudioHandle;
use audio_api::AudioCommand;
use middle::Board;
use readiness::Readiness;
use shared::InputEvent;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    // config problems are reported before the terminal goes raw
    let config = config::load_config(&dir)?;
    logging::setup_logger(&dir.join(&config.log_file))?;
    log::info!("padboard starting in {}", dir.display());

    terminal::enable_raw_mode()?;
    // Real press/release detection where the terminal supports it; otherwise
    // the input layer falls back to shift-for-release.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        let _ = crossterm::execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );
    }
    let _ = crossterm::execute!(std::io::stdout(), EnableMouseCapture, EnableFocusChange);
    let _guard = RawModeGuard { keyboard_enhanced }; // auto drops when out of scope
    log::info!("keyboard enhancement {}", if keyboard_enhanced { "on" } else { "off" });

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = Duration::from_millis(16); // ~60fps
    let mut tui_state = tui::mode::TuiState::new(keyboard_enhanced);

    // nothing is reachable until the audio side is up
    let mut readiness = Readiness::new(config.retry_interval());
    let audio = loop {
        if let Some(audio) =
            readiness.poll(Instant::now(), || audio::start_audio(config.max_record_secs))
        {
            break audio;
        }
        term.draw(|frame| {
            let area = frame.area();
            tui::view::render_waiting(frame, area, readiness.attempts(), readiness.last_error());
        })?;
        let events = tui::input::poll_input(tick_rate, &mut tui_state)?;
        if events.contains(&InputEvent::Quit) {
            return Ok(());
        }
    };
    if !audio.has_input() {
        log::warn!("running without a microphone, recording will fail");
    }

    let mut board = Board::new(&config);

    loop {
        let ds = board.display_state();
        term.draw(|frame| {
            let area = frame.area();
            tui::view::render(frame, area, &ds, board.router_mut());
        })?;

        let events = tui::input::poll_input(tick_rate, &mut tui_state)?;
        let now = Instant::now();
        for event in events {
            if event == InputEvent::Quit {
                log::info!("quitting");
                drop(term);
                drop(audio);
                return Ok(());
            }
            let cmds = board.handle_input(event, now);
            forward(&audio, &mut board, cmds);
        }

        // confirmations and failures from the audio thread
        while let Some(event) = audio.poll_event() {
            board.on_audio_event(event);
        }
    }
}

// a command the queue refused is a failed start as far as the pad is concerned
fn forward(audio: &AudioHandle, board: &mut Board, cmds: Vec<AudioCommand>) {
    for cmd in cmds {
        if let Err(error) = audio.send(cmd) {
            log::error!("dropped {:?} for pad {}: {}", cmd, cmd.pad().0, error);
            if let Some(event) = cmd.rejected(error) {
                board.on_audio_event(event);
            }
        }
    }
}

struct RawModeGuard {
    keyboard_enhanced: bool,
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = crossterm::execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture, DisableFocusChange);
        let _ = terminal::disable_raw_mode();
    }
}
