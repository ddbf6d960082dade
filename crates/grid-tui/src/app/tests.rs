use std::path::PathBuf;

use frz_grid_core::{
	ActionMenu, ActionResult, LabelGenerator, Session, StaticCandidates, TreeLabeler,
};
use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Position;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::theme::SLATE;

fn names(items: &[&str]) -> Vec<String> {
	items.iter().map(|item| item.to_string()).collect()
}

fn labels() -> Box<dyn LabelGenerator> {
	Box::new(TreeLabeler::new("asdfg".chars()).expect("valid alphabet"))
}

fn letters() -> Session {
	Session::builder(StaticCandidates(names(&["a", "b", "c", "d", "e"])))
		.column_cap(Some(4))
		.labels(labels())
		.build(20)
}

fn app(session: Session) -> App<'static> {
	let mut app = App::new(session);
	app.resize(22, 8);
	app
}

fn key(code: KeyCode) -> KeyEvent {
	KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
	KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn alt(c: char) -> KeyEvent {
	KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
}

fn render(app: &App<'_>) -> Terminal<TestBackend> {
	let mut terminal = Terminal::new(TestBackend::new(22, 8)).expect("test terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw");
	terminal
}

fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
	let buffer = terminal.backend().buffer();
	(0..buffer.area.height)
		.map(|y| {
			let line: String = (0..buffer.area.width)
				.map(|x| buffer[Position::new(x, y)].symbol())
				.collect();
			line.trim_end().to_string()
		})
		.collect()
}

struct Directories;

impl SessionOpener for Directories {
	fn open(
		&mut self,
		parent: &Session,
		index: usize,
		width: usize,
	) -> anyhow::Result<Option<Session>> {
		let candidate = &parent.candidates()[index];
		let Some(name) = candidate.strip_suffix('/') else {
			return Ok(None);
		};
		if name == "locked" {
			anyhow::bail!("permission denied: {candidate}");
		}
		let session = Session::builder(StaticCandidates(names(&["x", "y"])))
			.title(name)
			.context(PathBuf::from(candidate))
			.labels(labels())
			.build(width);
		Ok(Some(session))
	}
}

fn tree() -> App<'static> {
	let root = Session::builder(StaticCandidates(names(&["src/", "locked/", "README"])))
		.title("root")
		.labels(labels())
		.build(20);
	app(root).with_opener(Box::new(Directories))
}

#[test]
fn draws_grid_above_prompt_and_status() {
	let app = app(letters());
	let terminal = render(&app);

	assert_eq!(
		screen(&terminal),
		vec![
			String::new(),
			String::new(),
			String::new(),
			format!(" {}", "─".repeat(20)),
			" a    b    c    d".to_string(),
			" e".to_string(),
			" >".to_string(),
			" 5 candidates".to_string(),
		]
	);
}

#[test]
fn highlights_the_selected_cell() {
	let mut app = app(letters());
	assert_eq!(app.handle_key(key(KeyCode::Down)), None);
	let terminal = render(&app);
	let buffer = terminal.backend().buffer();

	let selected = buffer[Position::new(1, 5)].bg;
	assert_eq!(selected, SLATE.selected.bg.expect("selected background"));
	assert_ne!(buffer[Position::new(1, 4)].bg, selected);
}

#[test]
fn jump_labels_cover_their_cells_until_resolved() {
	let mut app = app(letters());
	assert_eq!(app.handle_key(alt('j')), None);

	let terminal = render(&app);
	let lines = screen(&terminal);
	assert_eq!(lines[4], " a    s    d    f");
	assert_eq!(lines[5], " g");
	assert_eq!(lines[7], " jump:   5 targets");

	assert_eq!(app.handle_key(key(KeyCode::Char('d'))), None);
	let session = app.stack().active().expect("session open");
	assert_eq!(session.selected_candidate(), Some("c"));
	assert!(session.pending_jump().is_none());
}

#[test]
fn escape_during_a_jump_only_cancels_the_jump() {
	let mut app = app(letters());
	app.handle_key(alt('j'));
	assert_eq!(app.handle_key(key(KeyCode::Esc)), None);
	assert_eq!(app.stack().depth(), 1);
	assert_eq!(
		app.status().map(|status| status.message.as_str()),
		Some("jump cancelled")
	);
}

#[test]
fn confirm_accepts_the_selection() {
	let mut app = app(letters());
	app.handle_key(key(KeyCode::Right));
	let outcome = app.handle_key(key(KeyCode::Enter)).expect("accepted");

	assert!(outcome.accepted);
	assert_eq!(
		outcome.selection,
		Some(Selected {
			candidate: "b".into(),
			index: 1,
			context: None,
		})
	);
	assert!(app.stack().is_empty());
}

#[test]
fn typing_refilters_the_candidates() {
	let filter = |query: &str| {
		["alpha", "beta", "gamma"]
			.iter()
			.filter(|item| item.contains(query))
			.map(|item| item.to_string())
			.collect::<Vec<_>>()
	};
	let mut app = app(Session::builder(filter).build(20));
	app.handle_key(key(KeyCode::Char('m')));

	assert_eq!(app.query(), "m");
	let session = app.stack().active().expect("session open");
	assert_eq!(session.candidates(), ["gamma".to_string()]);
	assert_eq!(app.panel().text(), "gamma");
}

#[test]
fn acted_candidates_are_reported_on_cancel() {
	let mut app = app(letters());
	assert_eq!(app.handle_key(alt('n')), None);
	assert_eq!(
		app.status().map(|status| status.message.as_str()),
		Some("acted on e")
	);

	let outcome = app.handle_key(key(KeyCode::Esc)).expect("cancelled");
	assert!(!outcome.accepted);
	assert_eq!(outcome.selection, None);
	assert_eq!(
		outcome
			.acted
			.iter()
			.map(|selected| selected.candidate.as_str())
			.collect::<Vec<_>>(),
		vec!["e"]
	);
}

#[test]
fn dispatch_menu_accepts_with_the_action_name() {
	let menu = ActionMenu::new().with_action('o', "open", "Open it", |_, _| ActionResult::Accept {
		action: "open".into(),
	});
	let session = Session::builder(StaticCandidates(names(&["a", "b", "c", "d", "e"])))
		.column_cap(Some(4))
		.labels(labels())
		.dispatcher(Box::new(menu))
		.build(20);
	let mut app = app(session);

	assert_eq!(app.handle_key(alt('d')), None);
	assert_eq!(app.handle_key(key(KeyCode::Char('s'))), None);
	let lines = screen(&render(&app));
	assert_eq!(lines[7], " b: [o] open");

	let outcome = app.handle_key(key(KeyCode::Char('o'))).expect("accepted");
	assert!(outcome.accepted);
	assert_eq!(outcome.action.as_deref(), Some("open"));
	assert_eq!(outcome.selection.map(|selected| selected.candidate), Some("b".into()));
}

#[test]
fn refused_operations_show_an_error() {
	let mut app = app(Session::builder(StaticCandidates(names(&["a"]))).build(20));
	assert_eq!(app.handle_key(alt('j')), None);
	assert!(app.status().is_some_and(|status| status.is_error));

	assert_eq!(app.handle_key(ctrl('d')), None);
	assert_eq!(
		app.status().map(|status| status.message.as_str()),
		Some("nothing here can be opened as a directory")
	);
	assert_eq!(app.stack().depth(), 1);
}

#[test]
fn nested_session_resumes_the_outer_one_on_cancel() {
	let mut app = tree();
	assert_eq!(app.handle_key(ctrl('d')), None);
	assert_eq!(app.stack().depth(), 2);
	assert_eq!(app.stack().active().map(Session::title), Some("src"));

	let lines = screen(&render(&app));
	assert_eq!(lines[6], " [2] src:");

	assert_eq!(app.handle_key(key(KeyCode::Esc)), None);
	assert_eq!(app.stack().depth(), 1);
	assert_eq!(
		app.status().map(|status| status.message.as_str()),
		Some("closed src, back in root")
	);
	assert_eq!(app.panel().text(), "src/      locked/\nREADME");
}

#[test]
fn accepting_inside_a_nested_session_keeps_its_context() {
	let mut app = tree();
	app.handle_key(ctrl('d'));
	app.handle_key(key(KeyCode::Right));
	let outcome = app.handle_key(key(KeyCode::Enter)).expect("accepted");

	let selected = outcome.selection.expect("selection");
	assert_eq!(selected.candidate, "y");
	assert_eq!(selected.path(), PathBuf::from("src/y"));
	assert!(app.stack().is_empty());
}

#[test]
fn cancel_all_closes_every_session() {
	let mut app = tree();
	app.handle_key(ctrl('d'));
	let outcome = app.handle_key(ctrl('c')).expect("cancelled");
	assert!(!outcome.accepted);
	assert!(app.stack().is_empty());
}

#[test]
fn opener_failures_and_plain_files_stay_in_the_session() {
	let mut app = tree();
	app.handle_key(key(KeyCode::Right));
	assert_eq!(app.handle_key(ctrl('d')), None);
	assert_eq!(
		app.status().map(|status| status.message.as_str()),
		Some("permission denied: locked/")
	);

	app.handle_key(key(KeyCode::Right));
	assert_eq!(app.handle_key(ctrl('d')), None);
	assert_eq!(
		app.status().map(|status| status.message.as_str()),
		Some("README is not a directory")
	);
	assert_eq!(app.stack().depth(), 1);
}

#[test]
fn resize_relays_out_and_limits_rows() {
	let mut app = app(letters());
	app.resize(8, 5);
	let session = app.stack().active().expect("session open");
	assert_eq!(session.layout().column_count(), 2);
	// Two rows are left once the prompt, status and separator are placed.
	assert_eq!(session.visible_rows(), 0..2);
	assert_eq!(app.panel().text(), "a  b\nc  d");
}

#[test]
fn attach_fits_sessions_to_the_terminal() {
	let mut app = App::new(letters());
	let mut terminal = Terminal::new(TestBackend::new(12, 6)).expect("test terminal");
	app.attach(&mut terminal).expect("attach");

	let session = app.stack().active().expect("session open");
	assert_eq!(session.layout().rows(), ["a  b  c", "d  e"]);
}

#[test]
fn typed_query_is_drawn_after_the_prompt() {
	let mut app = tree();
	for c in "sr".chars() {
		app.handle_key(key(KeyCode::Char(c)));
	}
	app.handle_key(ctrl('a'));
	app.handle_key(key(KeyCode::Char('x')));

	assert_eq!(app.query(), "xsr");
	let terminal = render(&app);
	assert_eq!(screen(&terminal)[6], " root: xsr");
}
