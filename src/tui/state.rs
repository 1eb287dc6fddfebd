use crate::form::{Field, FormController};
use crate::model::ItemKind;
use crate::render::{Command, Rendered, RenderedList, Row, render};
use crate::store::ItemStore;
use crate::tui::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Focus {
    Tasks,
    Events,
    Form,
}

pub struct AppState {
    pub rendered: Rendered,
    pub form: FormController,
    /// Copy of the last form sent with Enter, until the tracker answers.
    pub pending: Option<FormController>,
    pub field: Field,
    pub task_state: ListState,
    pub event_state: ListState,
    pub active_focus: Focus,
    pub message: String,
    pub loading: bool,
}

impl AppState {
    pub fn new(kind: ItemKind) -> Self {
        let mut t_state = ListState::default();
        t_state.select(Some(0));
        let mut e_state = ListState::default();
        e_state.select(Some(0));
        Self {
            rendered: render(&ItemStore::new()),
            form: FormController::new(kind),
            pending: None,
            field: Field::Name,
            task_state: t_state,
            event_state: e_state,
            active_focus: Focus::Tasks,
            message: "a: Add | Tab: Switch list | q: Quit".to_string(),
            loading: true,
        }
    }

    pub fn set_rendered(&mut self, rendered: Rendered) {
        self.rendered = rendered;
        self.loading = false;
        clamp(&mut self.task_state, self.rendered.tasks.rows().len());
        clamp(&mut self.event_state, self.rendered.events.rows().len());
    }

    fn focused_list(&mut self) -> Option<(&RenderedList, &mut ListState)> {
        match self.active_focus {
            Focus::Tasks => Some((&self.rendered.tasks, &mut self.task_state)),
            Focus::Events => Some((&self.rendered.events, &mut self.event_state)),
            Focus::Form => None,
        }
    }

    pub fn selected_row(&self) -> Option<&Row> {
        let (list, state) = match self.active_focus {
            Focus::Tasks => (&self.rendered.tasks, &self.task_state),
            Focus::Events => (&self.rendered.events, &self.event_state),
            Focus::Form => return None,
        };
        state.selected().and_then(|i| list.rows().get(i))
    }

    pub fn next(&mut self) {
        if let Some((list, state)) = self.focused_list() {
            let len = list.rows().len();
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            };
            state.select(Some(i));
        }
    }

    pub fn previous(&mut self) {
        if let Some((list, state)) = self.focused_list() {
            let len = list.rows().len();
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            state.select(Some(i));
        }
    }

    pub fn toggle_focus(&mut self) {
        self.active_focus = match self.active_focus {
            Focus::Tasks => Focus::Events,
            Focus::Events => Focus::Tasks,
            Focus::Form => Focus::Form,
        }
    }

    fn open_form(&mut self, kind: Option<ItemKind>) {
        if let Some(kind) = kind {
            self.form.select_kind(kind);
        }
        self.active_focus = Focus::Form;
        self.field = Field::Name;
        self.message = format!(
            "{}: Enter | Tab: Next field | F2: Task/Event | Esc: Back",
            self.form.submit_label()
        );
    }

    fn close_form(&mut self) {
        self.active_focus = Focus::Tasks;
        self.message = "a: Add | Tab: Switch list | q: Quit".to_string();
    }

    /// Called once the tracker accepted a submit. The fields were already
    /// cleared on Enter, so anything typed since then stays.
    pub fn on_submitted(&mut self) {
        self.pending = None;
        self.message = "Added.".to_string();
    }

    /// Called when the tracker rejected an action. A rejected submit puts the
    /// submitted values back, unless the user has started typing a new entry.
    pub fn on_error(&mut self, msg: &str) {
        self.message = format!("Error: {}", msg);
        if let Some(submitted) = self.pending.take()
            && self.form.name.is_empty()
            && self.form.time.is_empty()
            && self.form.date.is_empty()
        {
            self.form = submitted;
            self.field = Field::Name;
        }
    }

    fn submit_form(&mut self) -> Action {
        let submitted = self.form.clone();
        self.form.clear();
        self.field = Field::Name;
        self.pending = Some(submitted.clone());
        Action::Submit(submitted)
    }

    /// Translates a key press into state changes and, when the tracker must
    /// act, the action to send it.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.active_focus == Focus::Form {
            return self.on_form_key(key);
        }
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Tab => {
                self.toggle_focus();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                None
            }
            KeyCode::Char('a') => {
                let kind = match self.active_focus {
                    Focus::Events => ItemKind::Event,
                    _ => ItemKind::Task,
                };
                self.open_form(Some(kind));
                None
            }
            KeyCode::Char('t') => {
                self.open_form(Some(ItemKind::Task));
                None
            }
            KeyCode::Char('e') => {
                self.open_form(Some(ItemKind::Event));
                None
            }
            KeyCode::Char(' ') => self.selected_row().map(|r| Action::Run(r.toggle.clone())),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.selected_row().map(|r| Action::Run(r.delete.clone()))
            }
            KeyCode::Char('s') => Some(Action::Run(Command::SortByTime)),
            _ => None,
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.close_form();
                None
            }
            KeyCode::Tab => {
                self.field = self.field.next();
                None
            }
            KeyCode::F(2) => {
                let kind = match self.form.kind() {
                    ItemKind::Task => ItemKind::Event,
                    ItemKind::Event => ItemKind::Task,
                };
                self.open_form(Some(kind));
                None
            }
            KeyCode::Enter => Some(self.submit_form()),
            KeyCode::Backspace => {
                self.form.field_mut(self.field).pop();
                None
            }
            KeyCode::Char(c) => {
                self.form.field_mut(self.field).push(c);
                None
            }
            _ => None,
        }
    }
}

fn clamp(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(Some(0)),
        Some(i) if i >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        _ => {}
    }
}
