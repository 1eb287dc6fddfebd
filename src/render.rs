// File: ./src/render.rs
// Read-only projection of the store into displayable rows
use crate::model::{ItemId, ItemKind, format_date, format_time};
use crate::store::ItemStore;

pub const EMPTY_TASKS: &str = "No tasks yet. Add your first task!";
pub const EMPTY_EVENTS: &str = "No events yet. Add your first event!";

/// Everything a user can ask the tracker to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit,
    SelectKind(ItemKind),
    Toggle(ItemId),
    Delete(ItemId),
    SortByTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: ItemId,
    pub kind: ItemKind,
    pub completed: bool,
    pub name: String,
    pub time_label: String,
    pub date_label: Option<String>,
    pub toggle: Command,
    pub delete: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedList {
    Placeholder(&'static str),
    Rows(Vec<Row>),
}

impl RenderedList {
    pub fn rows(&self) -> &[Row] {
        match self {
            RenderedList::Placeholder(_) => &[],
            RenderedList::Rows(rows) => rows,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderedList::Placeholder(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub tasks: RenderedList,
    pub events: RenderedList,
}

impl Rendered {
    pub fn list(&self, kind: ItemKind) -> &RenderedList {
        match kind {
            ItemKind::Task => &self.tasks,
            ItemKind::Event => &self.events,
        }
    }
}

pub fn render(store: &ItemStore) -> Rendered {
    Rendered {
        tasks: render_list(store, ItemKind::Task),
        events: render_list(store, ItemKind::Event),
    }
}

fn render_list(store: &ItemStore, kind: ItemKind) -> RenderedList {
    let items = store.list(kind);
    if items.is_empty() {
        return RenderedList::Placeholder(placeholder(kind));
    }
    RenderedList::Rows(
        items
            .iter()
            .map(|item| Row {
                id: item.id,
                kind: item.kind,
                completed: item.completed,
                name: display_name(&item.name),
                time_label: format_time(&item.time),
                date_label: item.date.map(format_date),
                toggle: Command::Toggle(item.id),
                delete: Command::Delete(item.id),
            })
            .collect(),
    )
}

pub fn placeholder(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Task => EMPTY_TASKS,
        ItemKind::Event => EMPTY_EVENTS,
    }
}

/// Control characters would break the one-line row layout.
fn display_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
