//! The host region the grid is written into.

/// A fixed bottom-of-screen text region.
pub trait RenderSurface {
	/// Show `text` (rows separated by `\n`), sizing the region to its line count.
	///
	/// Must be a no-op when `text` is unchanged and `force` is false. Returns
	/// whether anything needs repainting.
	fn display(&mut self, text: &str, force: bool) -> bool;
}
