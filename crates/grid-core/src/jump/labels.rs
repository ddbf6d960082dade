use thiserror::Error;

/// Assigns key-sequence labels to a number of jump targets.
///
/// Implementations must return exactly `count` labels, none of which may be a
/// prefix of another.
pub trait LabelGenerator {
	fn labels(&self, count: usize) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
	#[error("jump alphabet needs at least two keys, got {0}")]
	TooShort(usize),
	#[error("jump alphabet repeats the key {0:?}")]
	Duplicate(char),
}

/// Balanced label tree over a fixed key alphabet.
///
/// While the targets fit the alphabet every target gets a single key. Beyond
/// that the targets are split into per-key subtrees whose sizes are as even as
/// possible, so the earliest targets keep the shortest labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLabeler {
	keys: Vec<char>,
}

impl TreeLabeler {
	pub fn new(keys: impl IntoIterator<Item = char>) -> Result<Self, AlphabetError> {
		let keys: Vec<char> = keys.into_iter().collect();
		if keys.len() < 2 {
			return Err(AlphabetError::TooShort(keys.len()));
		}
		for (position, key) in keys.iter().enumerate() {
			if keys[..position].contains(key) {
				return Err(AlphabetError::Duplicate(*key));
			}
		}
		Ok(Self { keys })
	}

	/// Home-row alphabet.
	pub fn home_row() -> Self {
		Self {
			keys: "asdfghjkl".chars().collect(),
		}
	}

	pub fn keys(&self) -> &[char] {
		&self.keys
	}

	fn assign(&self, count: usize, prefix: &mut String, out: &mut Vec<String>) {
		let base = self.keys.len();
		if count < base {
			for key in &self.keys[..count] {
				let mut label = prefix.clone();
				label.push(*key);
				out.push(label);
			}
			return;
		}
		for (key, size) in self.keys.iter().zip(subdivide(count, base)) {
			prefix.push(*key);
			if size == 1 {
				out.push(prefix.clone());
			} else {
				self.assign(size, prefix, out);
			}
			prefix.pop();
		}
	}
}

impl Default for TreeLabeler {
	fn default() -> Self {
		Self::home_row()
	}
}

impl LabelGenerator for TreeLabeler {
	fn labels(&self, count: usize) -> Vec<String> {
		let mut out = Vec::with_capacity(count);
		if count > 0 {
			self.assign(count, &mut String::new(), &mut out);
		}
		out
	}
}

/// Split `count >= base` targets across `base` keys.
///
/// With `x1 = base^p` and `x2 = base^(p+1)` bracketing `count`, the leading
/// keys get `x1` targets, the trailing keys get `x2`, and a single key in
/// between takes the remainder.
fn subdivide(count: usize, base: usize) -> Vec<usize> {
	let mut small = 1usize;
	while small.saturating_mul(base).saturating_mul(base) <= count {
		small *= base;
	}
	let large = small * base;
	let delta = count - large;
	let large_keys = delta / (large - small);
	let small_keys = base - large_keys - 1;
	let middle = count - small_keys * small - large_keys * large;

	let mut sizes = vec![small; small_keys];
	sizes.push(middle);
	sizes.extend(std::iter::repeat_n(large, large_keys));
	sizes
}
