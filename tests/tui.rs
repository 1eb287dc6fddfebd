#![cfg(feature = "tui")]
mod common;

use common::{RecordingStorage, tracker_with};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dayplan::model::ItemKind;
use dayplan::render::{Command, EMPTY_EVENTS, EMPTY_TASKS};
use dayplan::tui::action::{Action, AppEvent};
use dayplan::tui::run_actor;
use dayplan::tui::state::{AppState, Focus};
use dayplan::tui::view::draw;
use ratatui::{Terminal, backend::TestBackend};
use tokio::sync::mpsc;

fn press(state: &mut AppState, code: KeyCode) -> Option<Action> {
    state.on_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        assert!(press(state, KeyCode::Char(c)).is_none());
    }
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn empty_lists_draw_placeholders() {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    let mut state = AppState::new(ItemKind::Task);
    state.set_rendered(tracker_with(RecordingStorage::default()).rendered().clone());

    terminal.draw(|f| draw(f, &mut state)).unwrap();
    let screen = screen_text(&terminal);
    assert!(screen.contains(EMPTY_TASKS));
    assert!(screen.contains(EMPTY_EVENTS));
    assert!(screen.contains("Add Task"));
}

#[test]
fn rows_draw_name_and_time() {
    let mut tracker = tracker_with(RecordingStorage::default());
    let form = tracker.form_mut();
    form.name = "Buy milk".to_string();
    form.time = "08:00".to_string();
    tracker.dispatch(Command::Submit).unwrap();

    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    let mut state = AppState::new(ItemKind::Task);
    state.set_rendered(tracker.rendered().clone());
    terminal.draw(|f| draw(f, &mut state)).unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("[ ] Buy milk"));
    assert!(screen.contains("8:00 AM"));
}

#[test]
fn typing_into_form_then_enter_submits_it() {
    let mut state = AppState::new(ItemKind::Task);
    assert!(press(&mut state, KeyCode::Char('e')).is_none());
    assert_eq!(state.active_focus, Focus::Form);
    assert_eq!(state.form.submit_label(), "Add Event");

    type_text(&mut state, "Meeting");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "09:00");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "2025-01-01");

    match press(&mut state, KeyCode::Enter) {
        Some(Action::Submit(form)) => {
            assert_eq!(form.kind(), ItemKind::Event);
            assert_eq!(form.name, "Meeting");
            assert_eq!(form.time, "09:00");
            assert_eq!(form.date, "2025-01-01");
        }
        other => panic!("expected submit, got {:?}", other),
    }
}

#[test]
fn text_typed_while_a_submit_is_in_flight_survives_it() {
    let mut state = AppState::new(ItemKind::Task);
    press(&mut state, KeyCode::Char('a'));
    type_text(&mut state, "Buy milk");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "08:00");
    assert!(matches!(press(&mut state, KeyCode::Enter), Some(Action::Submit(_))));
    assert!(state.form.name.is_empty());
    assert!(state.form.time.is_empty());

    type_text(&mut state, "Walk dog");
    state.on_submitted();

    assert_eq!(state.form.name, "Walk dog");
    assert_eq!(state.message, "Added.");
    assert!(state.pending.is_none());
}

#[test]
fn rejected_submit_puts_the_fields_back() {
    let mut state = AppState::new(ItemKind::Task);
    press(&mut state, KeyCode::Char('e'));
    type_text(&mut state, "Meeting");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "09:00");
    press(&mut state, KeyCode::Enter);
    assert!(state.form.name.is_empty());

    state.on_error("Please fill in the event date.");

    assert_eq!(state.form.kind(), ItemKind::Event);
    assert_eq!(state.form.name, "Meeting");
    assert_eq!(state.form.time, "09:00");
    assert!(state.message.starts_with("Error: "));
    assert!(state.pending.is_none());
}

#[test]
fn rejected_submit_keeps_newer_typing() {
    let mut state = AppState::new(ItemKind::Task);
    press(&mut state, KeyCode::Char('a'));
    type_text(&mut state, "First");
    press(&mut state, KeyCode::Enter);
    type_text(&mut state, "Second");

    state.on_error("Please fill in the time.");

    assert_eq!(state.form.name, "Second");
}

#[test]
fn f2_switches_kind_without_clearing() {
    let mut state = AppState::new(ItemKind::Task);
    press(&mut state, KeyCode::Char('a'));
    type_text(&mut state, "Lunch");
    press(&mut state, KeyCode::F(2));
    assert_eq!(state.form.kind(), ItemKind::Event);
    assert!(state.form.date_required());
    assert_eq!(state.form.name, "Lunch");
}

#[test]
fn list_keys_emit_row_commands() {
    let mut tracker = tracker_with(RecordingStorage::default());
    let form = tracker.form_mut();
    form.name = "Read".to_string();
    form.time = "20:00".to_string();
    let row = tracker.dispatch(Command::Submit).unwrap().tasks.rows()[0].clone();

    let mut state = AppState::new(ItemKind::Task);
    state.set_rendered(tracker.rendered().clone());

    match press(&mut state, KeyCode::Char(' ')) {
        Some(Action::Run(cmd)) => assert_eq!(cmd, row.toggle),
        other => panic!("expected toggle, got {:?}", other),
    }
    match press(&mut state, KeyCode::Char('d')) {
        Some(Action::Run(cmd)) => assert_eq!(cmd, row.delete),
        other => panic!("expected delete, got {:?}", other),
    }
    assert!(matches!(
        press(&mut state, KeyCode::Char('s')),
        Some(Action::Run(Command::SortByTime))
    ));
    assert!(matches!(press(&mut state, KeyCode::Char('q')), Some(Action::Quit)));
}

#[test]
fn empty_list_has_nothing_to_toggle() {
    let mut state = AppState::new(ItemKind::Task);
    assert!(press(&mut state, KeyCode::Char(' ')).is_none());
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.active_focus, Focus::Events);
    assert!(press(&mut state, KeyCode::Char('d')).is_none());
}

#[tokio::test]
async fn actor_applies_actions_in_order() {
    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);
    let actor = tokio::spawn(run_actor(
        tracker_with(RecordingStorage::default()),
        action_rx,
        event_tx,
    ));

    assert!(matches!(event_rx.recv().await, Some(AppEvent::Rendered(_))));

    let mut bad = dayplan::form::FormController::new(ItemKind::Event);
    bad.name = "Meeting".to_string();
    bad.time = "09:00".to_string();
    action_tx.send(Action::Submit(bad.clone())).await.unwrap();
    match event_rx.recv().await {
        Some(AppEvent::Error(msg)) => assert_eq!(msg, "Date is required for events"),
        other => panic!("expected error, got {:?}", other),
    }

    bad.date = "2025-01-01".to_string();
    action_tx.send(Action::Submit(bad)).await.unwrap();
    match event_rx.recv().await {
        Some(AppEvent::Rendered(rendered)) => {
            assert_eq!(rendered.events.rows()[0].name, "Meeting");
            assert_eq!(rendered.tasks.rows().len(), 0);
        }
        other => panic!("expected render, got {:?}", other),
    }
    assert!(matches!(event_rx.recv().await, Some(AppEvent::Submitted)));

    action_tx.send(Action::Quit).await.unwrap();
    actor.await.unwrap();
}
