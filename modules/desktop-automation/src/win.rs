//! Win32 backend: window discovery via `EnumWindows`, focus via
//! `SetForegroundWindow`, keystroke injection via `SendInput`.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
    KEYEVENTF_UNICODE, VIRTUAL_KEY, VK_CONTROL, VK_MENU, VK_RETURN,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextW, IsWindowVisible, SetForegroundWindow,
};

use crate::error::{AutomationError, Result};
use crate::{poll_until, Desktop, Window};

/// How often window and dialog polls re-check the desktop.
const POLL_INTERVAL: Duration = Duration::from_millis(200);
/// Pause between save-dialog keystroke steps while the shell materializes
/// the dialog controls.
const DIALOG_STEP_DELAY: Duration = Duration::from_millis(500);
/// Per-keystroke pause while typing document text, so the edit control
/// keeps up.
const KEYSTROKE_DELAY: Duration = Duration::from_millis(10);

/// Title of the native file-save dialog.
const SAVE_DIALOG_TITLE: &str = "Save As";

pub struct WinDesktop;

impl WinDesktop {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WinDesktop {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Desktop for WinDesktop {
    async fn launch(&self, program: &str) -> Result<()> {
        Command::new(program)
            .spawn()
            .map_err(|e| AutomationError::Launch {
                program: program.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn find_window(&self, title_fragment: &str, timeout: Duration) -> Result<Window> {
        match poll_until(|| find_top_level(title_fragment), timeout, POLL_INTERVAL).await {
            Some(window) => {
                debug!(title = window.title(), "Window found");
                Ok(window)
            }
            None => Err(AutomationError::WindowTimeout {
                title: title_fragment.to_string(),
                timeout,
            }),
        }
    }

    async fn send_keys(&self, window: &Window, text: &str) -> Result<()> {
        focus(window)?;
        for ch in text.chars() {
            if ch == '\n' {
                tap_key(VK_RETURN)?;
            } else {
                tap_unicode(ch)?;
            }
            sleep(KEYSTROKE_DELAY).await;
        }
        Ok(())
    }

    async fn confirm_dialog(&self, window: &Window, path: &Path, timeout: Duration) -> Result<()> {
        focus(window)?;
        chord(VK_CONTROL, key('s'))?;

        // The save dialog is itself a top-level window.
        let dialog = poll_until(|| find_top_level(SAVE_DIALOG_TITLE), timeout, POLL_INTERVAL)
            .await
            .ok_or(AutomationError::DialogTimeout { timeout })?;
        focus(&dialog)?;
        sleep(DIALOG_STEP_DELAY).await;

        for ch in path.to_string_lossy().chars() {
            tap_unicode(ch)?;
            sleep(KEYSTROKE_DELAY).await;
        }
        sleep(DIALOG_STEP_DELAY).await;
        tap_key(VK_RETURN)?;

        // An overwrite confirmation may or may not appear; Alt+Y answers it
        // and lands as a dead keystroke in the editor otherwise.
        sleep(DIALOG_STEP_DELAY).await;
        chord(VK_MENU, key('y'))?;
        sleep(DIALOG_STEP_DELAY).await;

        Ok(())
    }
}

/// One pass over the visible top-level windows; first title match wins.
fn find_top_level(title_fragment: &str) -> Option<Window> {
    struct Search {
        fragment: String,
        found: Option<Window>,
    }

    unsafe extern "system" fn enum_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let search = &mut *(lparam.0 as *mut Search);
        if !IsWindowVisible(hwnd).as_bool() {
            return BOOL::from(true);
        }
        let mut buf = [0u16; 512];
        let len = GetWindowTextW(hwnd, &mut buf);
        if len > 0 {
            let title = String::from_utf16_lossy(&buf[..len as usize]);
            if title.contains(&search.fragment) {
                search.found = Some(Window::new(hwnd.0 as isize, title));
                return BOOL::from(false);
            }
        }
        BOOL::from(true)
    }

    let mut search = Search {
        fragment: title_fragment.to_string(),
        found: None,
    };
    // EnumWindows reports an error when the callback stops the walk early;
    // a hit is already in `search.found` by then.
    let _ = unsafe { EnumWindows(Some(enum_proc), LPARAM(&mut search as *mut Search as isize)) };
    search.found
}

fn focus(window: &Window) -> Result<()> {
    let ok = unsafe { SetForegroundWindow(HWND(window.raw() as *mut _)) };
    if ok.as_bool() {
        Ok(())
    } else {
        Err(AutomationError::Input(format!(
            "could not focus `{}`",
            window.title()
        )))
    }
}

/// Virtual-key code for an ASCII letter.
fn key(c: char) -> VIRTUAL_KEY {
    VIRTUAL_KEY(c.to_ascii_uppercase() as u16)
}

fn keyboard_input(vk: VIRTUAL_KEY, scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn send(inputs: &[INPUT]) -> Result<()> {
    let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
    if sent as usize == inputs.len() {
        Ok(())
    } else {
        Err(AutomationError::Input(format!(
            "injected {sent} of {} events",
            inputs.len()
        )))
    }
}

/// Press and release a character as a unicode event pair.
fn tap_unicode(ch: char) -> Result<()> {
    let mut units = [0u16; 2];
    let encoded = ch.encode_utf16(&mut units);
    let mut inputs = Vec::with_capacity(encoded.len() * 2);
    for &unit in encoded.iter() {
        inputs.push(keyboard_input(VIRTUAL_KEY(0), unit, KEYEVENTF_UNICODE));
        inputs.push(keyboard_input(
            VIRTUAL_KEY(0),
            unit,
            KEYEVENTF_UNICODE | KEYEVENTF_KEYUP,
        ));
    }
    send(&inputs)
}

/// Press and release a virtual key.
fn tap_key(vk: VIRTUAL_KEY) -> Result<()> {
    send(&[
        keyboard_input(vk, 0, KEYBD_EVENT_FLAGS(0)),
        keyboard_input(vk, 0, KEYEVENTF_KEYUP),
    ])
}

/// Hold `modifier`, tap `vk`, release `modifier`.
fn chord(modifier: VIRTUAL_KEY, vk: VIRTUAL_KEY) -> Result<()> {
    send(&[
        keyboard_input(modifier, 0, KEYBD_EVENT_FLAGS(0)),
        keyboard_input(vk, 0, KEYBD_EVENT_FLAGS(0)),
        keyboard_input(vk, 0, KEYEVENTF_KEYUP),
        keyboard_input(modifier, 0, KEYEVENTF_KEYUP),
    ])
}
