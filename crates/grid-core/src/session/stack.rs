use super::Session;

/// Nested sessions, innermost last.
///
/// Only the innermost session receives input. Pushing suspends the session
/// below it without touching its state; popping resumes it exactly as it was.
#[derive(Debug, Default)]
pub struct SessionStack {
	sessions: Vec<Session>,
}

impl SessionStack {
	pub fn new(root: Session) -> Self {
		Self {
			sessions: vec![root],
		}
	}

	pub fn depth(&self) -> usize {
		self.sessions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sessions.is_empty()
	}

	pub fn active(&self) -> Option<&Session> {
		self.sessions.last()
	}

	pub fn active_mut(&mut self) -> Option<&mut Session> {
		self.sessions.last_mut()
	}

	/// Start a nested session on top of the active one.
	pub fn push(&mut self, session: Session) {
		tracing::debug!(
			depth = self.sessions.len() + 1,
			title = session.title(),
			"nested session started"
		);
		self.sessions.push(session);
	}

	/// Close the innermost session and resume the one below it.
	pub fn pop(&mut self) -> Option<Session> {
		let closed = self.sessions.pop()?;
		tracing::debug!(
			depth = self.sessions.len(),
			title = closed.title(),
			"session closed"
		);
		Some(closed)
	}

	/// Cancel the session at `depth`.
	///
	/// Sessions nested inside it are closed first, innermost to outermost, so
	/// cancelling an outer session is fatal to everything it spawned. Returns
	/// the closed sessions in closing order.
	pub fn cancel_at(&mut self, depth: usize) -> Vec<Session> {
		if depth >= self.sessions.len() {
			return Vec::new();
		}
		let mut closed = self.sessions.split_off(depth);
		closed.reverse();
		tracing::debug!(depth, closed = closed.len(), "cancelled session and its nested sessions");
		closed
	}

	/// Cancel every session.
	pub fn cancel_all(&mut self) -> Vec<Session> {
		self.cancel_at(0)
	}

	/// Lay every session out again for a new width, so suspended sessions
	/// resume at the right size.
	pub fn resize(&mut self, width: usize) {
		for session in &mut self.sessions {
			session.resize(width);
		}
	}

	pub fn set_max_rows(&mut self, rows: Option<usize>) {
		for session in &mut self.sessions {
			session.set_max_rows(rows);
		}
	}
}
