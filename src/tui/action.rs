// Defines actions and events exchanged between the UI loop and the tracker actor.
use crate::form::FormController;
use crate::render::{Command, Rendered};

#[derive(Debug)]
pub enum Action {
    /// Submit the form exactly as the user typed it.
    Submit(FormController),
    Run(Command),
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    Rendered(Rendered),
    /// The last submit was accepted, so the input fields can be cleared.
    Submitted,
    Error(String),
    Status(String),
}
