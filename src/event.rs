use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    Frame(Instant),
}

/// Polls the terminal on a background thread and emits a frame event
/// whenever no key arrives within the frame budget.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(frame_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let frame = Duration::from_millis(frame_ms);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let sent = if event::poll(frame).unwrap_or(false) {
                    match event::read() {
                        Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            tx.send(Event::Key(key))
                        }
                        _ => Ok(()),
                    }
                } else {
                    tx.send(Event::Frame(Instant::now()))
                };
                if sent.is_err() {
                    return;
                }
            }
        });

        Self { rx, stop }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
