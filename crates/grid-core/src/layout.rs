//! Column-aligned grid layout for a flat list of candidates.
//!
//! The layout is a pure function of the candidate list, the column cap and the
//! available width. It produces the rendered rows together with a side table
//! that maps every on-screen cell back to the logical candidate index it was
//! rendered from.

use unicode_width::UnicodeWidthStr;

/// Column cap applied when the caller does not configure one.
pub const DEFAULT_COLUMN_CAP: usize = 4;

/// Blank cells reserved next to the longest candidate when sizing columns.
const COLUMN_PADDING: usize = 2;

/// A single rendered candidate and where it landed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
	/// Zero-based row in [`GridLayout::rows`].
	pub row: usize,
	/// Display column the candidate starts at.
	pub column: usize,
	/// Display width of the candidate.
	pub width: usize,
	/// Logical index into the candidate list.
	pub index: usize,
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
	column_count: usize,
	column_width: usize,
	rows: Vec<String>,
	cells: Vec<GridCell>,
	/// For each logical index, the position in `cells` of the cell that shows it.
	/// Collapsed duplicates point at the first entry of their run.
	index_to_cell: Vec<usize>,
}

impl GridLayout {
	/// Number of grid columns, always at least one.
	pub fn column_count(&self) -> usize {
		self.column_count
	}

	/// Width of a single column in display cells.
	pub fn column_width(&self) -> usize {
		self.column_width
	}

	/// Rendered rows without trailing newlines.
	pub fn rows(&self) -> &[String] {
		&self.rows
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	/// The whole grid as displayable text with `\n` row breaks.
	pub fn rendered_text(&self) -> String {
		self.rows.join("\n")
	}

	/// Screen position → logical index side table, in render order.
	pub fn cells(&self) -> &[GridCell] {
		&self.cells
	}

	/// Cell that displays the candidate at `index`.
	///
	/// A candidate skipped as a consecutive duplicate resolves to the cell of
	/// the first entry of its run.
	pub fn cell_for_index(&self, index: usize) -> Option<&GridCell> {
		let position = *self.index_to_cell.get(index)?;
		self.cells.get(position)
	}

	/// Cells whose row falls inside `rows`.
	pub fn cells_in_rows(
		&self,
		rows: std::ops::Range<usize>,
	) -> impl Iterator<Item = &GridCell> + '_ {
		self.cells
			.iter()
			.filter(move |cell| rows.contains(&cell.row))
	}
}

/// Number of columns the grid uses for the given constraints.
pub fn column_count(
	longest_width: usize,
	column_cap: Option<usize>,
	available_width: usize,
) -> usize {
	let cap = column_cap.unwrap_or(DEFAULT_COLUMN_CAP);
	let fitting = available_width / (longest_width + COLUMN_PADDING);
	cap.min(fitting).max(1)
}

/// Lay `candidates` out as a grid `available_width` cells wide.
///
/// A zero width is treated as a single cell so the result always has at least
/// one column.
pub fn layout<S: AsRef<str>>(
	candidates: &[S],
	column_cap: Option<usize>,
	available_width: usize,
) -> GridLayout {
	let available_width = available_width.max(1);
	let longest = candidates
		.iter()
		.map(|candidate| candidate.as_ref().width())
		.max()
		.unwrap_or(0);
	let column_count = column_count(longest, column_cap, available_width);
	let column_width = available_width / column_count;

	let mut rows = vec![String::new()];
	let mut cells = Vec::with_capacity(candidates.len());
	let mut index_to_cell = Vec::with_capacity(candidates.len());
	let mut offset = 0usize;
	let mut line_width = 0usize;
	let mut previous: Option<&str> = None;

	for (index, candidate) in candidates.iter().enumerate() {
		let text = candidate.as_ref();
		if previous == Some(text) {
			let run_leader = cells.len() - 1;
			index_to_cell.push(run_leader);
			continue;
		}
		previous = Some(text);

		let width = text.width();
		let mut pad = 0;
		if line_width > 0 || offset > 0 {
			if width == 0 || offset + column_width.max(width) > available_width {
				rows.push(String::new());
				if width == 0 {
					rows.push(String::new());
				}
				offset = 0;
				line_width = 0;
			} else {
				pad = offset.saturating_sub(line_width);
				if pad == 0 && line_width > 0 {
					pad = 1;
				}
			}
		}

		let row = rows.len() - 1;
		let line = &mut rows[row];
		line.extend(std::iter::repeat_n(' ', pad));
		line.push_str(text);

		let column = line_width + pad;
		line_width = column + width;
		offset += column_width * width.div_ceil(column_width);

		index_to_cell.push(cells.len());
		cells.push(GridCell {
			row,
			column,
			width,
			index,
		});
	}

	tracing::trace!(
		candidates = candidates.len(),
		column_count,
		column_width,
		rows = rows.len(),
		"laid out candidate grid"
	);

	GridLayout {
		column_count,
		column_width,
		rows,
		cells,
		index_to_cell,
	}
}
