use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::Command;
use crate::view::{SearchPhase, View};

/// Resolve a keypress against the active view. While the search pattern is
/// being typed every printable character is input, including `q`, which
/// elsewhere means "go back"; Esc is the way out of the prompt.
pub fn command_for(view: &View, key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    if let View::PodSearch(search) = view {
        if search.phase == SearchPhase::Typing {
            return match key.code {
                KeyCode::Esc => Some(Command::SearchCancel),
                KeyCode::Enter => Some(Command::SearchSubmit),
                KeyCode::Backspace => Some(Command::SearchBackspace),
                KeyCode::Char(c) => Some(Command::SearchChar(c)),
                _ => None,
            };
        }
    }

    match view {
        View::Main(_) => match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('s') => Some(Command::OpenPodSearch),
            KeyCode::Char('c') => Some(Command::OpenContextSelect),
            KeyCode::Char('r') => Some(Command::Refresh),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),
            KeyCode::Enter => Some(Command::Select),
            _ => None,
        },
        View::PodSearch(_) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Back),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),
            KeyCode::Enter | KeyCode::Char('d') => Some(Command::Select),
            KeyCode::Char('n') => Some(Command::ShowHostNode),
            _ => None,
        },
        View::ContextSelect(_) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Back),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),
            KeyCode::Enter => Some(Command::Select),
            _ => None,
        },
        View::Detail(_) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Back),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{DetailRequest, DetailView, MainView, PodSearchView};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn main_view() -> View {
        View::Main(MainView::empty())
    }

    fn search_view(phase: SearchPhase) -> View {
        let mut search = PodSearchView::open(main_view());
        search.phase = phase;
        View::PodSearch(search)
    }

    #[test]
    fn main_view_bindings() {
        let view = main_view();
        assert_eq!(command_for(&view, &key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(command_for(&view, &key(KeyCode::Char('s'))), Some(Command::OpenPodSearch));
        assert_eq!(command_for(&view, &key(KeyCode::Char('c'))), Some(Command::OpenContextSelect));
        assert_eq!(command_for(&view, &key(KeyCode::Char('r'))), Some(Command::Refresh));
        assert_eq!(command_for(&view, &key(KeyCode::Enter)), Some(Command::Select));
        assert_eq!(command_for(&view, &key(KeyCode::Char('j'))), Some(Command::CursorDown));
        assert_eq!(command_for(&view, &key(KeyCode::Char('k'))), Some(Command::CursorUp));
        assert_eq!(command_for(&view, &key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn typing_mode_treats_q_as_input() {
        let view = search_view(SearchPhase::Typing);
        assert_eq!(command_for(&view, &key(KeyCode::Char('q'))), Some(Command::SearchChar('q')));
        assert_eq!(command_for(&view, &key(KeyCode::Esc)), Some(Command::SearchCancel));
        assert_eq!(command_for(&view, &key(KeyCode::Enter)), Some(Command::SearchSubmit));
        assert_eq!(command_for(&view, &key(KeyCode::Backspace)), Some(Command::SearchBackspace));
    }

    #[test]
    fn results_mode_navigates_and_returns() {
        let view = search_view(SearchPhase::Results);
        assert_eq!(command_for(&view, &key(KeyCode::Char('q'))), Some(Command::Back));
        assert_eq!(command_for(&view, &key(KeyCode::Char('d'))), Some(Command::Select));
        assert_eq!(command_for(&view, &key(KeyCode::Enter)), Some(Command::Select));
        assert_eq!(command_for(&view, &key(KeyCode::Char('n'))), Some(Command::ShowHostNode));
    }

    #[test]
    fn detail_view_only_navigates_and_returns() {
        let view = View::Detail(DetailView::nodes(
            "Nodes: worker".into(),
            DetailRequest::GroupNodes { group: "worker".into() },
            main_view(),
        ));
        assert_eq!(command_for(&view, &key(KeyCode::Char('q'))), Some(Command::Back));
        assert_eq!(command_for(&view, &key(KeyCode::Char('j'))), Some(Command::CursorDown));
        assert_eq!(command_for(&view, &key(KeyCode::Enter)), None);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&main_view(), &ctrl_c), Some(Command::Quit));
        assert_eq!(command_for(&search_view(SearchPhase::Typing), &ctrl_c), Some(Command::Quit));
    }
}
