//! TUI application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use payload_codec::{Pacing, ScheduledUpdate, TransformConsole};
use signature_engine::InspectorConsole;

/// The two widget views, toggled with Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Transform,
    Inspector,
}

/// The inspector form field currently accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Method,
    Path,
    Payload,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Method => Self::Path,
            Self::Path => Self::Payload,
            Self::Payload => Self::Method,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Method => Self::Payload,
            Self::Path => Self::Method,
            Self::Payload => Self::Path,
        }
    }
}

/// Events fed into the application by the event loop.
pub enum AppEvent {
    /// Key event from the terminal.
    Key(KeyEvent),
    /// One staged display update became due.
    Step(ScheduledUpdate),
    /// The currently playing staged sequence finished.
    PlaybackDone,
    /// The inspector's boot-row delay elapsed.
    BootRow,
}

/// TUI application state: both widget consoles plus view/form bookkeeping.
pub struct App {
    pub view: View,
    pub transform: TransformConsole,
    pub inspector: InspectorConsole,
    pub focus: FormField,
    pub method_input: String,
    pub path_input: String,
    pub payload_input: String,
    /// True while a staged transform sequence is playing; new encode/decode
    /// requests are ignored until it finishes.
    pub playing: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(pacing: Pacing) -> anyhow::Result<Self> {
        Ok(Self {
            view: View::Transform,
            transform: TransformConsole::new(pacing),
            inspector: InspectorConsole::new()?,
            focus: FormField::Method,
            method_input: "GET".to_string(),
            path_input: "/".to_string(),
            payload_input: String::new(),
            playing: false,
            should_quit: false,
        })
    }

    /// Handle one event.  A returned queue means the caller should start
    /// playing it (the app has already marked itself as playing).
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Vec<ScheduledUpdate>> {
        match event {
            AppEvent::Key(key) => return self.handle_key(key),
            AppEvent::Step(step) => self.transform.apply(step),
            AppEvent::PlaybackDone => self.playing = false,
            AppEvent::BootRow => self.inspector.boot_record(),
        }
        None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Vec<ScheduledUpdate>> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                None
            }
            (KeyCode::Tab, _) => {
                self.view = match self.view {
                    View::Transform => View::Inspector,
                    View::Inspector => View::Transform,
                };
                None
            }
            _ => match self.view {
                View::Transform => self.handle_transform_key(key),
                View::Inspector => {
                    self.handle_inspector_key(key);
                    None
                }
            },
        }
    }

    fn handle_transform_key(&mut self, key: KeyEvent) -> Option<Vec<ScheduledUpdate>> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => self.start_playback(true),
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => self.start_playback(false),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                self.transform.clear();
                None
            }
            (KeyCode::Backspace, _) => {
                self.transform.pop_char();
                None
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.transform.push_char(c);
                None
            }
            _ => None,
        }
    }

    fn start_playback(&mut self, encode: bool) -> Option<Vec<ScheduledUpdate>> {
        if self.playing {
            return None;
        }
        let steps = if encode {
            self.transform.encode_sequence()
        } else {
            self.transform.decode_sequence()
        };
        self.playing = true;
        Some(steps)
    }

    fn handle_inspector_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                self.inspector
                    .submit(&self.method_input, &self.path_input, &self.payload_input);
                self.payload_input.clear();
            }
            (KeyCode::Down, _) => self.focus = self.focus.next(),
            (KeyCode::Up, _) => self.focus = self.focus.prev(),
            (KeyCode::Backspace, _) => {
                self.focused_input().pop();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.focused_input().push(c);
            }
            _ => {}
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            FormField::Method => &mut self.method_input,
            FormField::Path => &mut self.path_input,
            FormField::Payload => &mut self.payload_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> App {
        App::new(Pacing::ZERO).expect("rule table should compile")
    }

    #[test]
    fn tab_toggles_views() {
        let mut a = app();
        assert_eq!(a.view, View::Transform);
        a.handle_event(AppEvent::Key(key(KeyCode::Tab)));
        assert_eq!(a.view, View::Inspector);
        a.handle_event(AppEvent::Key(key(KeyCode::Tab)));
        assert_eq!(a.view, View::Transform);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut a = app();
        a.handle_event(AppEvent::Key(ctrl('c')));
        assert!(a.should_quit);
    }

    #[test]
    fn typing_edits_the_transform_buffer() {
        let mut a = app();
        a.handle_event(AppEvent::Key(key(KeyCode::Char('h'))));
        a.handle_event(AppEvent::Key(key(KeyCode::Char('i'))));
        assert_eq!(a.transform.buffer(), "hi");
        a.handle_event(AppEvent::Key(key(KeyCode::Backspace)));
        assert_eq!(a.transform.buffer(), "h");
    }

    #[test]
    fn enter_starts_encode_playback_once() {
        let mut a = app();
        a.transform.set_buffer("abc");
        let steps = a.handle_event(AppEvent::Key(key(KeyCode::Enter)));
        assert!(steps.is_some());
        assert!(a.playing);

        // A second trigger while playing is ignored.
        assert!(a.handle_event(AppEvent::Key(key(KeyCode::Enter))).is_none());

        for step in steps.unwrap() {
            a.handle_event(AppEvent::Step(step));
        }
        a.handle_event(AppEvent::PlaybackDone);
        assert!(!a.playing);
        assert_eq!(a.transform.buffer(), "Y2Jh");
    }

    #[test]
    fn inspector_submit_records_and_clears_payload() {
        let mut a = app();
        a.handle_event(AppEvent::Key(key(KeyCode::Tab)));
        a.payload_input = "' OR 1=1 --".to_string();
        a.handle_event(AppEvent::Key(key(KeyCode::Enter)));
        assert_eq!(a.inspector.counters().total_requests, 1);
        assert_eq!(a.inspector.counters().blocked_requests, 1);
        assert!(a.payload_input.is_empty());
    }

    #[test]
    fn arrow_keys_cycle_form_focus() {
        let mut a = app();
        a.handle_event(AppEvent::Key(key(KeyCode::Tab)));
        assert_eq!(a.focus, FormField::Method);
        a.handle_event(AppEvent::Key(key(KeyCode::Down)));
        assert_eq!(a.focus, FormField::Path);
        a.handle_event(AppEvent::Key(key(KeyCode::Down)));
        assert_eq!(a.focus, FormField::Payload);
        a.handle_event(AppEvent::Key(key(KeyCode::Down)));
        assert_eq!(a.focus, FormField::Method);
        a.handle_event(AppEvent::Key(key(KeyCode::Up)));
        assert_eq!(a.focus, FormField::Payload);
    }

    #[test]
    fn boot_row_event_records_system_row() {
        let mut a = app();
        a.handle_event(AppEvent::BootRow);
        assert_eq!(a.inspector.counters().total_requests, 1);
        let record = a
            .inspector
            .journal()
            .latest()
            .unwrap()
            .request
            .as_ref()
            .unwrap();
        assert_eq!(record.method, "SYSTEM");
    }
}
