use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    /// Frame pulse; the app pumps the visible session on each one.
    Tick,
}

/// Reads the terminal on its own thread and forwards key presses and frame
/// pulses. Game state never leaves the main thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(frame: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut last_pulse = Instant::now();
            loop {
                // Held keys must not starve the pulse.
                let timeout = frame.saturating_sub(last_pulse.elapsed());
                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(event::Event::Key(key)) = event::read() {
                            if key.kind == KeyEventKind::Press && tx.send(Event::Key(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        log::error!("terminal event poll failed: {}", e);
                        return;
                    }
                }
                if last_pulse.elapsed() >= frame {
                    last_pulse = Instant::now();
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}
