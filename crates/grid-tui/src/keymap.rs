//! Key specs such as `ctrl-n` or `alt-j`, and the bindings from keys to
//! grid operations.

use std::fmt;
use std::str::FromStr;

use frz_grid_core::{JumpInput, Operation};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpecError {
	#[error("empty key spec")]
	Empty,
	#[error("unknown modifier `{0}`")]
	UnknownModifier(String),
	#[error("unknown key `{0}`")]
	UnknownKey(String),
}

/// A single key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
	code: KeyCode,
	modifiers: KeyModifiers,
}

impl KeySpec {
	pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
		Self { code, modifiers }
	}

	pub const fn plain(code: KeyCode) -> Self {
		Self::new(code, KeyModifiers::NONE)
	}

	pub const fn ctrl(key: char) -> Self {
		Self::new(KeyCode::Char(key), KeyModifiers::CONTROL)
	}

	pub const fn alt(key: char) -> Self {
		Self::new(KeyCode::Char(key), KeyModifiers::ALT)
	}

	pub fn code(&self) -> KeyCode {
		self.code
	}

	pub fn modifiers(&self) -> KeyModifiers {
		self.modifiers
	}

	pub fn matches(&self, event: &KeyEvent) -> bool {
		let (code, modifiers) = normalize(event.code, event.modifiers);
		self.code == code && self.modifiers == modifiers
	}
}

/// Shift is already part of a typed character, so it is dropped for
/// character keys and back-tab.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
	match code {
		KeyCode::Char(_) | KeyCode::BackTab => (code, modifiers - KeyModifiers::SHIFT),
		_ => (code, modifiers),
	}
}

impl FromStr for KeySpec {
	type Err = KeySpecError;

	fn from_str(spec: &str) -> Result<Self, Self::Err> {
		let spec = spec.trim();
		if spec.is_empty() {
			return Err(KeySpecError::Empty);
		}
		// A trailing `-` is the minus key itself, as in `alt--`.
		let (prefix, key) = match spec.strip_suffix("--") {
			Some(prefix) => (Some(prefix), "-"),
			None if spec == "-" => (None, "-"),
			None => match spec.rsplit_once('-') {
				Some((prefix, key)) => (Some(prefix), key),
				None => (None, spec),
			},
		};

		let mut modifiers = KeyModifiers::NONE;
		for modifier in prefix.into_iter().flat_map(|prefix| prefix.split('-')) {
			modifiers |= match modifier.to_ascii_lowercase().as_str() {
				"c" | "ctrl" | "control" => KeyModifiers::CONTROL,
				"m" | "alt" | "meta" => KeyModifiers::ALT,
				"s" | "shift" => KeyModifiers::SHIFT,
				_ => return Err(KeySpecError::UnknownModifier(modifier.to_string())),
			};
		}

		let code = parse_code(key)?;
		let code = match code {
			KeyCode::Char(c) if modifiers.contains(KeyModifiers::SHIFT) => {
				KeyCode::Char(c.to_ascii_uppercase())
			}
			other => other,
		};
		let (code, modifiers) = normalize(code, modifiers);
		Ok(Self { code, modifiers })
	}
}

fn parse_code(key: &str) -> Result<KeyCode, KeySpecError> {
	let mut chars = key.chars();
	if let (Some(c), None) = (chars.next(), chars.next()) {
		return Ok(KeyCode::Char(c));
	}
	let lowered = key.to_ascii_lowercase();
	let code = match lowered.as_str() {
		"enter" | "return" | "ret" => KeyCode::Enter,
		"esc" | "escape" => KeyCode::Esc,
		"tab" => KeyCode::Tab,
		"backtab" => KeyCode::BackTab,
		"backspace" | "bs" => KeyCode::Backspace,
		"delete" | "del" => KeyCode::Delete,
		"insert" | "ins" => KeyCode::Insert,
		"home" => KeyCode::Home,
		"end" => KeyCode::End,
		"pageup" | "pgup" => KeyCode::PageUp,
		"pagedown" | "pgdn" => KeyCode::PageDown,
		"up" => KeyCode::Up,
		"down" => KeyCode::Down,
		"left" => KeyCode::Left,
		"right" => KeyCode::Right,
		"space" | "spc" => KeyCode::Char(' '),
		"minus" => KeyCode::Char('-'),
		other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
			Some(n) if (1..=24).contains(&n) => KeyCode::F(n),
			_ => return Err(KeySpecError::UnknownKey(key.to_string())),
		},
	};
	Ok(code)
}

impl fmt::Display for KeySpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modifiers.contains(KeyModifiers::CONTROL) {
			f.write_str("ctrl-")?;
		}
		if self.modifiers.contains(KeyModifiers::ALT) {
			f.write_str("alt-")?;
		}
		if self.modifiers.contains(KeyModifiers::SHIFT) {
			f.write_str("shift-")?;
		}
		match self.code {
			KeyCode::Char(' ') => f.write_str("space"),
			KeyCode::Char(c) => write!(f, "{c}"),
			KeyCode::F(n) => write!(f, "f{n}"),
			KeyCode::Enter => f.write_str("enter"),
			KeyCode::Esc => f.write_str("esc"),
			KeyCode::Tab => f.write_str("tab"),
			KeyCode::BackTab => f.write_str("backtab"),
			KeyCode::Backspace => f.write_str("backspace"),
			KeyCode::Delete => f.write_str("delete"),
			KeyCode::Insert => f.write_str("insert"),
			KeyCode::Home => f.write_str("home"),
			KeyCode::End => f.write_str("end"),
			KeyCode::PageUp => f.write_str("pageup"),
			KeyCode::PageDown => f.write_str("pagedown"),
			KeyCode::Up => f.write_str("up"),
			KeyCode::Down => f.write_str("down"),
			KeyCode::Left => f.write_str("left"),
			KeyCode::Right => f.write_str("right"),
			other => write!(f, "{other:?}"),
		}
	}
}

/// Which keys run which operation, and which keys cancel a pending jump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
	bindings: Vec<(KeySpec, Operation)>,
	jump_cancel: Vec<KeySpec>,
}

impl Default for Keymap {
	fn default() -> Self {
		use Operation as Op;

		let alt = |code| KeySpec::new(code, KeyModifiers::ALT);
		let bindings = vec![
			(KeySpec::plain(KeyCode::Right), Op::Forward),
			(KeySpec::ctrl('f'), Op::Forward),
			(KeySpec::plain(KeyCode::Left), Op::Backward),
			(KeySpec::ctrl('b'), Op::Backward),
			(KeySpec::alt('f'), Op::ForwardAndAct),
			(alt(KeyCode::Right), Op::ForwardAndAct),
			(KeySpec::alt('b'), Op::BackwardAndAct),
			(alt(KeyCode::Left), Op::BackwardAndAct),
			(KeySpec::plain(KeyCode::Down), Op::Down),
			(KeySpec::ctrl('n'), Op::Down),
			(KeySpec::plain(KeyCode::Up), Op::Up),
			(KeySpec::ctrl('p'), Op::Up),
			(KeySpec::alt('n'), Op::DownAndAct),
			(alt(KeyCode::Down), Op::DownAndAct),
			(KeySpec::alt('p'), Op::UpAndAct),
			(alt(KeyCode::Up), Op::UpAndAct),
			(KeySpec::alt('j'), Op::Jump),
			(KeySpec::alt('d'), Op::JumpAndDispatch),
			(KeySpec::ctrl('d'), Op::OpenAsDirectory),
			(KeySpec::plain(KeyCode::Enter), Op::Confirm),
			(KeySpec::plain(KeyCode::Esc), Op::Cancel),
			(KeySpec::ctrl('g'), Op::Cancel),
			(KeySpec::ctrl('c'), Op::CancelAll),
		];
		Self {
			bindings,
			jump_cancel: vec![KeySpec::plain(KeyCode::Esc), KeySpec::ctrl('g')],
		}
	}
}

impl Keymap {
	/// Replace every key bound to `operation` with `keys`.
	///
	/// A key already bound to another operation moves to this one.
	pub fn bind(&mut self, operation: Operation, keys: impl IntoIterator<Item = KeySpec>) {
		let keys: Vec<KeySpec> = keys.into_iter().collect();
		self.bindings
			.retain(|(key, bound)| *bound != operation && !keys.contains(key));
		self.bindings
			.extend(keys.into_iter().map(|key| (key, operation)));
	}

	pub fn set_jump_cancel(&mut self, keys: impl IntoIterator<Item = KeySpec>) {
		self.jump_cancel = keys.into_iter().collect();
	}

	pub fn operation_for(&self, event: &KeyEvent) -> Option<Operation> {
		self.bindings
			.iter()
			.find(|(key, _)| key.matches(event))
			.map(|(_, operation)| *operation)
	}

	pub fn keys_for(&self, operation: Operation) -> impl Iterator<Item = &KeySpec> + '_ {
		self.bindings
			.iter()
			.filter(move |(_, bound)| *bound == operation)
			.map(|(key, _)| key)
	}

	/// Translate a key pressed while a jump or dispatch is pending.
	///
	/// Returns `None` for keys that should be ignored, such as bare modifiers.
	pub fn jump_input(&self, event: &KeyEvent) -> Option<JumpInput> {
		if self.jump_cancel.iter().any(|key| key.matches(event)) {
			return Some(JumpInput::Cancel);
		}
		let (code, modifiers) = normalize(event.code, event.modifiers);
		match code {
			KeyCode::Backspace => Some(JumpInput::Backspace),
			KeyCode::Char(c) if modifiers.is_empty() => Some(JumpInput::Key(c)),
			KeyCode::Modifier(_) => None,
			_ => Some(JumpInput::Cancel),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
		KeyEvent::new(code, modifiers)
	}

	#[test]
	fn parses_modifiers_and_named_keys() {
		assert_eq!("ctrl-n".parse(), Ok(KeySpec::ctrl('n')));
		assert_eq!("M-j".parse(), Ok(KeySpec::alt('j')));
		assert_eq!("Enter".parse(), Ok(KeySpec::plain(KeyCode::Enter)));
		assert_eq!("alt-down".parse(), Ok(KeySpec::new(KeyCode::Down, KeyModifiers::ALT)));
		assert_eq!("f5".parse(), Ok(KeySpec::plain(KeyCode::F(5))));
		assert_eq!("alt--".parse(), Ok(KeySpec::alt('-')));
		assert_eq!("shift-a".parse(), Ok(KeySpec::plain(KeyCode::Char('A'))));
	}

	#[test]
	fn rejects_unknown_parts() {
		assert_eq!("".parse::<KeySpec>(), Err(KeySpecError::Empty));
		assert_eq!(
			"hyper-x".parse::<KeySpec>(),
			Err(KeySpecError::UnknownModifier("hyper".into()))
		);
		assert_eq!(
			"ctrl-banana".parse::<KeySpec>(),
			Err(KeySpecError::UnknownKey("banana".into()))
		);
	}

	#[test]
	fn displays_in_parseable_form() {
		assert_eq!(KeySpec::ctrl('n').to_string(), "ctrl-n");
		assert_eq!(KeySpec::new(KeyCode::Down, KeyModifiers::ALT).to_string(), "alt-down");
	}

	#[test]
	fn shifted_characters_match_without_the_shift_flag() {
		let spec: KeySpec = "J".parse().unwrap();
		assert!(spec.matches(&press(KeyCode::Char('J'), KeyModifiers::SHIFT)));
		assert!(!spec.matches(&press(KeyCode::Char('j'), KeyModifiers::NONE)));
	}

	#[test]
	fn default_bindings_cover_every_operation() {
		let keymap = Keymap::default();
		for operation in Operation::ALL {
			assert!(
				keymap.keys_for(operation).next().is_some(),
				"{operation} has no default key"
			);
		}
		assert_eq!(
			keymap.operation_for(&press(KeyCode::Char('n'), KeyModifiers::CONTROL)),
			Some(Operation::Down)
		);
		assert_eq!(
			keymap.operation_for(&press(KeyCode::Char('x'), KeyModifiers::NONE)),
			None
		);
	}

	#[test]
	fn rebinding_moves_keys_between_operations() {
		let mut keymap = Keymap::default();
		keymap.bind(Operation::Jump, [KeySpec::ctrl('n')]);

		assert_eq!(
			keymap.operation_for(&press(KeyCode::Char('n'), KeyModifiers::CONTROL)),
			Some(Operation::Jump)
		);
		assert_eq!(
			keymap.operation_for(&press(KeyCode::Char('j'), KeyModifiers::ALT)),
			None
		);
		assert_eq!(
			keymap.keys_for(Operation::Down).collect::<Vec<_>>(),
			vec![&KeySpec::plain(KeyCode::Down)]
		);
	}

	#[test]
	fn translates_jump_keys() {
		let keymap = Keymap::default();
		assert_eq!(
			keymap.jump_input(&press(KeyCode::Char('s'), KeyModifiers::NONE)),
			Some(JumpInput::Key('s'))
		);
		assert_eq!(
			keymap.jump_input(&press(KeyCode::Backspace, KeyModifiers::NONE)),
			Some(JumpInput::Backspace)
		);
		assert_eq!(
			keymap.jump_input(&press(KeyCode::Char('g'), KeyModifiers::CONTROL)),
			Some(JumpInput::Cancel)
		);
		assert_eq!(
			keymap.jump_input(&press(KeyCode::Down, KeyModifiers::NONE)),
			Some(JumpInput::Cancel)
		);
	}
}
