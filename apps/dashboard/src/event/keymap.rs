use crate::ui::layout::DashboardLayout;
use climate_dashboard::controllers::{ClickTarget, FormField, ModalId};
use climate_dashboard::domain::ActionKind;
use climate_dashboard::events::UiEvent;
use climate_dashboard::Dashboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Which part of the screen currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Dashboard,
    Search,
    LocationForm,
    Help,
}

impl InputContext {
    pub fn of(dashboard: &Dashboard) -> Self {
        if dashboard.search.is_open() {
            return Self::Search;
        }
        match dashboard.modals.active() {
            Some(ModalId::AddLocation) => Self::LocationForm,
            Some(ModalId::Help) => Self::Help,
            None => Self::Dashboard,
        }
    }
}

pub fn map_key(context: InputContext, focus: FormField, key: KeyEvent) -> Option<UiEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match context {
        InputContext::Dashboard => map_dashboard_key(key.code),
        InputContext::Search => match key.code {
            KeyCode::Esc => Some(UiEvent::Escape),
            KeyCode::Backspace => Some(UiEvent::SearchBackspace),
            KeyCode::Char(ch) => Some(UiEvent::SearchChar(ch)),
            _ => None,
        },
        InputContext::LocationForm => map_form_key(focus, key.code),
        InputContext::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') => Some(UiEvent::Escape),
            _ => None,
        },
    }
}

fn map_dashboard_key(code: KeyCode) -> Option<UiEvent> {
    match code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Left => Some(UiEvent::PreviousLink),
        KeyCode::Right => Some(UiEvent::NextLink),
        KeyCode::Char('m') => Some(UiEvent::ToggleMobileMenu),
        KeyCode::Char('/') => Some(UiEvent::OpenSearch),
        KeyCode::Char('[') => Some(UiEvent::ShiftRange(false)),
        KeyCode::Char(']') => Some(UiEvent::ShiftRange(true)),
        KeyCode::Char('x') => Some(UiEvent::DismissNewestToast),
        KeyCode::Char('?') => Some(UiEvent::ShowModal(ModalId::Help)),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit.to_digit(10).map_or(0, |d| d as usize - 1);
            ActionKind::from_index(index).map(UiEvent::Action)
        }
        _ => None,
    }
}

fn map_form_key(focus: FormField, code: KeyCode) -> Option<UiEvent> {
    match code {
        KeyCode::Esc => Some(UiEvent::Escape),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::FormFocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::FormFocusPrevious),
        KeyCode::Enter => Some(UiEvent::FormActivate),
        KeyCode::Left if focus == FormField::PropertyType => Some(UiEvent::FormCycleOption(false)),
        KeyCode::Right if focus == FormField::PropertyType => Some(UiEvent::FormCycleOption(true)),
        KeyCode::Backspace => Some(UiEvent::FormBackspace),
        KeyCode::Char(ch) if focus.is_text() => Some(UiEvent::FormChar(ch)),
        _ => None,
    }
}

/// Left clicks only. Any open dialog takes the click first.
pub fn map_mouse(dashboard: &Dashboard, layout: &DashboardLayout, mouse: MouseEvent) -> Option<UiEvent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let at = Position::new(mouse.column, mouse.row);

    if let Some(id) = dashboard.modals.active() {
        let dialog = match id {
            ModalId::AddLocation => layout.modal,
            ModalId::Help => layout.help,
        };
        let target = if dialog.contains(at) {
            ClickTarget::Content
        } else {
            ClickTarget::Backdrop
        };
        return Some(UiEvent::ModalClick(target));
    }

    if dashboard.search.is_open() {
        return None;
    }

    if let Some((fx, fy)) = layout.map_fraction(mouse.column, mouse.row) {
        let viewport = dashboard.map_scene().snapshot().viewport()?;
        return Some(UiEvent::MapClick(viewport.unproject(fx, fy)));
    }

    let cards = u32::try_from(dashboard.action_cards().len()).unwrap_or(1);
    layout
        .action_at(mouse.column, mouse.row, cards)
        .and_then(|index| dashboard.action_cards().get(index).copied())
        .map(UiEvent::Action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn dashboard_keys_map_to_events() {
        let map = |code| map_key(InputContext::Dashboard, FormField::Name, press(code));
        assert_eq!(map(KeyCode::Char('q')), Some(UiEvent::Quit));
        assert_eq!(map(KeyCode::Char('2')), Some(UiEvent::Action(ActionKind::Analysis)));
        assert_eq!(map(KeyCode::Char('4')), Some(UiEvent::Action(ActionKind::Emergency)));
        assert_eq!(map(KeyCode::Char(']')), Some(UiEvent::ShiftRange(true)));
        assert_eq!(map(KeyCode::Char('z')), None);
    }

    #[test]
    fn search_captures_every_character() {
        let event = map_key(InputContext::Search, FormField::Name, press(KeyCode::Char('q')));
        assert_eq!(event, Some(UiEvent::SearchChar('q')));
    }

    #[test]
    fn form_typing_depends_on_focus() {
        assert_eq!(
            map_key(InputContext::LocationForm, FormField::Name, press(KeyCode::Char('q'))),
            Some(UiEvent::FormChar('q'))
        );
        assert_eq!(
            map_key(InputContext::LocationForm, FormField::Submit, press(KeyCode::Char('q'))),
            None
        );
        assert_eq!(
            map_key(InputContext::LocationForm, FormField::PropertyType, press(KeyCode::Right)),
            Some(UiEvent::FormCycleOption(true))
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputContext::LocationForm, FormField::Name, key), Some(UiEvent::Quit));
    }
}
