use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use super::{App, Outcome};

/// Run `app` to completion on the terminal.
pub fn run(mut app: App<'_>) -> Result<Outcome> {
	app.run()
}

impl App<'_> {
	/// Clear `terminal` and fit every session to its size.
	pub(crate) fn attach<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
		terminal.clear()?;
		let size = terminal.size()?;
		self.resize(size.width, size.height);
		Ok(())
	}

	/// Pump the terminal event loop until the last session closes.
	pub fn run(&mut self) -> Result<Outcome> {
		let mut terminal = ratatui::init();
		if let Err(error) = self.attach(&mut terminal) {
			ratatui::restore();
			return Err(error.into());
		}

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<Outcome> = 'event_loop: loop {
			loop {
				match event_rx.try_recv() {
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			let mut maybe_outcome = None;
			while let Some(event) = pending_events.pop_front() {
				match event {
					Event::Key(key) if key.kind == KeyEventKind::Press => {
						if let Some(outcome) = self.handle_key(key) {
							maybe_outcome = Some(outcome);
							break;
						}
					}
					Event::Resize(width, height) => self.resize(width, height),
					_ => {}
				}
			}

			if let Some(outcome) = maybe_outcome {
				break Ok(outcome);
			}

			if self.take_redraw() {
				if let Err(error) = terminal.draw(|frame| self.draw(frame)) {
					break Err(error.into());
				}
			}

			thread::sleep(Duration::from_millis(16));
		};

		ratatui::restore();

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		result
	}
}
