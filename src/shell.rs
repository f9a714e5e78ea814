use std::fmt;

pub const SHOW_MENU_ID: &str = "show";
pub const QUIT_MENU_ID: &str = "quit";

/// The window operations the tray needs. Implemented for the Tauri webview
/// window in `app`, and by fakes in tests.
pub trait WindowControl {
    type Error: fmt::Display;

    fn is_visible(&self) -> Result<bool, Self::Error>;
    fn show(&self) -> Result<(), Self::Error>;
    fn hide(&self) -> Result<(), Self::Error>;
    fn focus(&self) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayAction {
    ToggleWindow,
    Quit,
}

impl TrayAction {
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            SHOW_MENU_ID => Some(TrayAction::ToggleWindow),
            QUIT_MENU_ID => Some(TrayAction::Quit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Hides a visible window; otherwise shows and focuses it.
pub fn toggle_window<W: WindowControl>(window: &W) -> Result<Visibility, W::Error> {
    if window.is_visible()? {
        window.hide()?;
        Ok(Visibility::Hidden)
    } else {
        window.show()?;
        window.focus()?;
        Ok(Visibility::Shown)
    }
}

/// Shows and focuses the window whatever its current state.
pub fn reveal_window<W: WindowControl>(window: &W) -> Result<(), W::Error> {
    window.show()?;
    window.focus()
}

/// Whether closing every window should end the process. macOS apps stay resident.
pub fn exits_when_windows_closed(target_os: &str) -> bool {
    target_os != "macos"
}

/// Where the process stays resident, a close request only hides the window so
/// the tray can bring the same window back.
pub fn close_hides_window(target_os: &str) -> bool {
    !exits_when_windows_closed(target_os)
}
