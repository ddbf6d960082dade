//! Where candidate lists come from.

/// Produces a fresh, ordered candidate list for the current query.
///
/// The session pulls from the source every time the query changes and
/// replaces its candidate list wholesale with the result.
pub trait CandidateSource {
	fn candidates(&mut self, query: &str) -> Vec<String>;
}

/// A fixed list that ignores the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCandidates(pub Vec<String>);

impl CandidateSource for StaticCandidates {
	fn candidates(&mut self, _query: &str) -> Vec<String> {
		self.0.clone()
	}
}

impl<F> CandidateSource for F
where
	F: FnMut(&str) -> Vec<String>,
{
	fn candidates(&mut self, query: &str) -> Vec<String> {
		self(query)
	}
}
