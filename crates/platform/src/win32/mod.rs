//! Win32 implementation of the platform window service

mod host;
mod thumbnail;

pub use host::{Win32OverlayHost, Win32PreviewHost};
pub use thumbnail::DwmThumbnail;

use crate::{
    Hotkey, HotkeyId, PlatformError, PlatformResult, Rect, WindowHandle, WindowService,
};
use std::sync::atomic::{AtomicI32, Ordering};
use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::Graphics::Dwm::DwmIsCompositionEnabled;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT,
    MOD_SHIFT, MOD_WIN,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowLongW, GetWindowPlacement, GetWindowRect, IsIconic, IsZoomed,
    MoveWindow, SendMessageW, SetForegroundWindow, SetWindowPlacement, ShowWindowAsync,
    GWL_STYLE, SC_MINIMIZE, SW_RESTORE, SW_SHOWMAXIMIZED, SW_MINIMIZE, WINDOWPLACEMENT,
    WM_SYSCOMMAND, WS_MINIMIZE,
};

pub(crate) fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut std::ffi::c_void)
}

pub(crate) fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

/// Application-defined hotkey ids live in 0x0000..=0xBFFF.
static NEXT_HOTKEY_ID: AtomicI32 = AtomicI32::new(1);

fn hotkey_modifiers(hotkey: &Hotkey) -> HOT_KEY_MODIFIERS {
    let mut mods = MOD_NOREPEAT;
    if hotkey.modifiers.ctrl {
        mods |= MOD_CONTROL;
    }
    if hotkey.modifiers.alt {
        mods |= MOD_ALT;
    }
    if hotkey.modifiers.shift {
        mods |= MOD_SHIFT;
    }
    if hotkey.modifiers.win {
        mods |= MOD_WIN;
    }
    mods
}

/// Window service backed by user32 and DWM
pub struct Win32WindowService {
    composition_enabled: bool,
}

impl Win32WindowService {
    /// Create the service, confirming desktop composition once.
    pub fn new() -> PlatformResult<Self> {
        // Always on since Windows 8; the call only matters on Windows 7
        let composition_enabled = unsafe { DwmIsCompositionEnabled()?.as_bool() };
        if !composition_enabled {
            return Err(PlatformError::CompositionUnavailable);
        }

        log::debug!("Desktop composition confirmed");
        Ok(Self { composition_enabled })
    }
}

impl WindowService for Win32WindowService {
    type Thumbnail = DwmThumbnail;

    fn is_composition_enabled(&self) -> bool {
        self.composition_enabled
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.is_invalid() {
            None
        } else {
            Some(from_hwnd(hwnd))
        }
    }

    fn activate(&self, handle: WindowHandle) {
        let hwnd = to_hwnd(handle);
        unsafe {
            let _ = SetForegroundWindow(hwnd);

            let style = GetWindowLongW(hwnd, GWL_STYLE) as u32;
            if style & WS_MINIMIZE.0 == WS_MINIMIZE.0 {
                let _ = ShowWindowAsync(hwnd, SW_RESTORE);
            }
        }
    }

    fn minimize(&self, handle: WindowHandle, animate: bool) {
        let hwnd = to_hwnd(handle);
        unsafe {
            if animate {
                SendMessageW(hwnd, WM_SYSCOMMAND, WPARAM(SC_MINIMIZE as usize), LPARAM(0));
                return;
            }

            let mut placement = WINDOWPLACEMENT {
                length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
                ..Default::default()
            };
            if let Err(e) = GetWindowPlacement(hwnd, &mut placement) {
                log::warn!("Failed to read placement of {}: {}", handle, e);
                return;
            }
            placement.showCmd = SW_MINIMIZE.0 as u32;
            if let Err(e) = SetWindowPlacement(hwnd, &placement) {
                log::warn!("Failed to minimize {}: {}", handle, e);
            }
        }
    }

    fn move_window(&self, handle: WindowHandle, left: i32, top: i32, width: i32, height: i32) {
        unsafe {
            if let Err(e) = MoveWindow(to_hwnd(handle), left, top, width, height, true) {
                log::warn!("Failed to move {}: {}", handle, e);
            }
        }
    }

    fn maximize(&self, handle: WindowHandle) {
        unsafe {
            let _ = ShowWindowAsync(to_hwnd(handle), SW_SHOWMAXIMIZED);
        }
    }

    fn position(&self, handle: WindowHandle) -> Rect {
        let mut rect = RECT::default();
        unsafe {
            if let Err(e) = GetWindowRect(to_hwnd(handle), &mut rect) {
                log::warn!("Failed to query position of {}: {}", handle, e);
            }
        }
        Rect::new(rect.left, rect.top, rect.right, rect.bottom)
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        unsafe { IsZoomed(to_hwnd(handle)).as_bool() }
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        unsafe { IsIconic(to_hwnd(handle)).as_bool() }
    }

    fn register_thumbnail(
        &self,
        destination: WindowHandle,
        source: WindowHandle,
    ) -> PlatformResult<DwmThumbnail> {
        DwmThumbnail::register(destination, source)
    }

    fn register_hotkey(&self, owner: WindowHandle, hotkey: Hotkey) -> PlatformResult<HotkeyId> {
        let id = NEXT_HOTKEY_ID.fetch_add(1, Ordering::Relaxed);

        unsafe {
            RegisterHotKey(to_hwnd(owner), id, hotkey_modifiers(&hotkey), hotkey.vk).map_err(
                |e| PlatformError::HotkeyRegistration(format!("{} on {}: {}", hotkey, owner, e)),
            )?;
        }

        log::debug!("Registered hotkey {} (id {}) on {}", hotkey, id, owner);
        Ok(id)
    }

    fn unregister_hotkey(&self, owner: WindowHandle, id: HotkeyId) {
        unsafe {
            if let Err(e) = UnregisterHotKey(to_hwnd(owner), id) {
                log::warn!("Failed to unregister hotkey {} on {}: {}", id, owner, e);
            }
        }
    }
}
