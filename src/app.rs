use std::sync::Arc;

use log::{debug, error, info, warn};
use tauri::menu::{Menu, MenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use tauri::{
    AppHandle, Emitter, Manager, RunEvent, WebviewUrl, WebviewWindow, WebviewWindowBuilder,
    WindowEvent,
};

use crate::config::{MonitorConfig, WindowConfig};
use crate::display::DisplayState;
use crate::metrics::{
    DeliveryChannel, SnapshotCollector, SnapshotPoller, SysinfoProvider, SystemData,
};
use crate::shell::{
    close_hides_window, exits_when_windows_closed, toggle_window, TrayAction, WindowControl,
    QUIT_MENU_ID, SHOW_MENU_ID,
};

/// Event carrying the latest [`DisplayState`] after every poll.
pub const SNAPSHOT_EVENT: &str = "system-data";

const MAIN_WINDOW: &str = "main";
const TRAY_ID: &str = "main-tray";

type SysinfoChannel = DeliveryChannel<SysinfoProvider>;

impl WindowControl for WebviewWindow {
    type Error = tauri::Error;

    fn is_visible(&self) -> Result<bool, tauri::Error> {
        WebviewWindow::is_visible(self)
    }

    fn show(&self) -> Result<(), tauri::Error> {
        WebviewWindow::show(self)
    }

    fn hide(&self) -> Result<(), tauri::Error> {
        WebviewWindow::hide(self)
    }

    fn focus(&self) -> Result<(), tauri::Error> {
        self.set_focus()
    }
}

/// Owns the main window and the tray icon. Built once in `setup`.
pub struct ShellController {
    window: WebviewWindow,
    _tray: TrayIcon,
}

impl ShellController {
    fn toggle(&self) {
        match toggle_window(&self.window) {
            Ok(visibility) => debug!("main window now {:?}", visibility),
            Err(err) => warn!("failed to toggle main window: {}", err),
        }
    }

    #[cfg(target_os = "macos")]
    fn reveal(&self) {
        if let Err(err) = crate::shell::reveal_window(&self.window) {
            warn!("failed to reveal main window: {}", err);
        }
    }
}

#[tauri::command]
async fn get_system_data(
    channel: tauri::State<'_, Arc<SysinfoChannel>>,
) -> Result<Option<SystemData>, String> {
    Ok(channel.request_snapshot().await)
}

#[tauri::command]
async fn get_display_state(
    poller: tauri::State<'_, SnapshotPoller>,
) -> Result<DisplayState, String> {
    Ok(poller.current().await)
}

pub fn run() {
    crate::init_logging();
    info!("starting host-monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = MonitorConfig::load();
    let channel = Arc::new(DeliveryChannel::new(
        SnapshotCollector::new(SysinfoProvider::new(), config.query_timeout()),
        config.overlap_policy,
    ));
    let poller_channel = Arc::clone(&channel);

    let built = tauri::Builder::default()
        .manage(channel)
        .invoke_handler(tauri::generate_handler![get_system_data, get_display_state])
        .setup(move |app| {
            let window = build_main_window(app.handle(), &config.window)?;
            let tray = build_tray(app.handle(), &config.tray_tooltip)?;
            app.manage(ShellController {
                window,
                _tray: tray,
            });

            let handle = app.handle().clone();
            let poller = SnapshotPoller::spawn(
                poller_channel,
                config.poll_interval(),
                move |state: &DisplayState| {
                    if let Err(err) = handle.emit(SNAPSHOT_EVENT, state) {
                        warn!("failed to emit {}: {}", SNAPSHOT_EVENT, err);
                    }
                },
            )?;
            app.manage(poller);
            Ok(())
        })
        .build(tauri::generate_context!());

    let app = match built {
        Ok(app) => app,
        Err(err) => {
            error!("failed to build application: {}", err);
            return;
        }
    };

    app.run(|_app, event| match event {
        RunEvent::ExitRequested { code, api, .. } => {
            // `code` is None when the last window closed rather than an explicit exit.
            if code.is_none() && !exits_when_windows_closed(std::env::consts::OS) {
                api.prevent_exit();
            }
        }
        // Dock icon clicked with no visible window.
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows: false,
            ..
        } => {
            if let Some(shell) = _app.try_state::<ShellController>() {
                shell.reveal();
            }
        }
        RunEvent::Exit => info!("host-monitor exiting"),
        _ => {}
    });
}

fn build_main_window(app: &AppHandle, config: &WindowConfig) -> tauri::Result<WebviewWindow> {
    let window = WebviewWindowBuilder::new(app, MAIN_WINDOW, WebviewUrl::default())
        .title(config.title.clone())
        .inner_size(config.width, config.height)
        .visible(!config.start_hidden)
        .build()?;

    // Minimising hides the window; it comes back from the tray. Where the process
    // stays resident, closing hides it too so the tray never loses its window.
    let watched = window.clone();
    let hide_on_close = close_hides_window(std::env::consts::OS);
    window.on_window_event(move |event| match event {
        WindowEvent::Resized(_) => {
            if watched.is_minimized().unwrap_or(false) {
                if let Err(err) = WebviewWindow::hide(&watched) {
                    warn!("failed to hide minimised window: {}", err);
                }
            }
        }
        WindowEvent::CloseRequested { api, .. } if hide_on_close => {
            api.prevent_close();
            if let Err(err) = WebviewWindow::hide(&watched) {
                warn!("failed to hide closed window: {}", err);
            }
        }
        _ => {}
    });

    Ok(window)
}

fn build_tray(app: &AppHandle, tooltip: &str) -> tauri::Result<TrayIcon> {
    let show = MenuItem::with_id(app, SHOW_MENU_ID, "Show", true, None::<&str>)?;
    let quit = MenuItem::with_id(app, QUIT_MENU_ID, "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&show, &quit])?;

    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .tooltip(tooltip)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| match TrayAction::from_menu_id(event.id().as_ref()) {
            Some(TrayAction::ToggleWindow) => toggle_main_window(app),
            Some(TrayAction::Quit) => {
                info!("quit requested from tray");
                app.exit(0);
            }
            None => {}
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                toggle_main_window(tray.app_handle());
            }
        });

    if let Some(icon) = app.default_window_icon() {
        builder = builder.icon(icon.clone());
    }

    builder.build(app)
}

fn toggle_main_window(app: &AppHandle) {
    match app.try_state::<ShellController>() {
        Some(shell) => shell.toggle(),
        None => warn!("tray event before the shell was ready"),
    }
}
