//! Preview and overlay host windows
//!
//! Both windows keep a boxed [`HostState`] in `GWLP_USERDATA` and translate
//! window messages into [`HostEvent`]s pushed over a channel. The UI thread
//! drains the channel and feeds the events to the preview core.

use super::from_hwnd;
use crate::{
    Color, FrameStyle, HostEvent, HostWindow, KeyModifiers, MouseButton, MouseButtons,
    OverlayHost, PlatformResult, Point, PointerEvent, PreviewHost, Rect, Size, WindowHandle,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use once_cell::sync::OnceCell;
use windows::core::{w, HSTRING, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, ClientToScreen, CreateSolidBrush, DeleteObject, EndPaint, FillRect,
    InvalidateRect, SetBkColor, SetBkMode, SetTextColor, TextOutW, OPAQUE, PAINTSTRUCT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, ReleaseCapture, SetCapture, TrackMouseEvent, TME_LEAVE, TRACKMOUSEEVENT, VK_MENU,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetClientRect, GetWindowLongPtrW,
    GetWindowRect, IsWindow, LoadCursorW, RegisterClassExW, SetLayeredWindowAttributes, SetWindowLongPtrW,
    SetWindowLongW, SetWindowPos, SetWindowTextW, ShowWindow, GWLP_USERDATA, GWL_STYLE,
    HWND_NOTOPMOST, HWND_TOPMOST, IDC_ARROW, LWA_ALPHA, LWA_COLORKEY, MINMAXINFO, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SW_HIDE, SW_SHOWNOACTIVATE, WINDOW_STYLE,
    WM_ERASEBKGND, WM_GETMINMAXINFO, WM_HOTKEY, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE,
    WM_MOVE, WM_NCDESTROY, WM_PAINT, WM_RBUTTONDOWN, WM_RBUTTONUP, WM_SIZE, WNDCLASSEXW,
    WS_CAPTION, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_POPUP, WS_SYSMENU,
    WS_THICKFRAME,
};

const PREVIEW_CLASS: PCWSTR = w!("ThumbviewPreview");
const OVERLAY_CLASS: PCWSTR = w!("ThumbviewOverlay");

// Not every message constant is exposed under the features we enable
const WM_MOUSELEAVE: u32 = 0x02A3;

// wParam flags of mouse messages
const MK_LBUTTON: usize = 0x0001;
const MK_RBUTTON: usize = 0x0002;
const MK_SHIFT: usize = 0x0004;
const MK_CONTROL: usize = 0x0008;
const MK_MBUTTON: usize = 0x0010;

/// Overlay pixels of this colour are see-through and click-through
const OVERLAY_COLOR_KEY: COLORREF = COLORREF(0x00FF00FF);
const DEFAULT_BACKGROUND: COLORREF = COLORREF(0x00F0F0F0);
const CAPTION_TEXT: COLORREF = COLORREF(0x00FFFFFF);
const CAPTION_BACKGROUND: COLORREF = COLORREF(0x00202020);
const CAPTION_MARGIN: i32 = 4;

static CLASSES: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostKind {
    Preview,
    Overlay,
}

struct HostState {
    kind: HostKind,
    events: Sender<HostEvent>,
    tracking_leave: bool,
    background: COLORREF,
    caption: Vec<u16>,
    caption_visible: bool,
    min_size: Size,
    max_size: Size,
}

impl HostState {
    fn new(kind: HostKind, events: Sender<HostEvent>) -> Self {
        Self {
            kind,
            events,
            tracking_leave: false,
            background: if kind == HostKind::Overlay { OVERLAY_COLOR_KEY } else { DEFAULT_BACKGROUND },
            caption: Vec::new(),
            caption_visible: false,
            min_size: Size::default(),
            max_size: Size::default(),
        }
    }

    fn send(&self, event: HostEvent) {
        // The receiver is gone once the controller dropped the preview
        let _ = self.events.send(event);
    }
}

fn instance() -> PlatformResult<HINSTANCE> {
    let hmodule = unsafe { GetModuleHandleW(None)? };
    Ok(HINSTANCE(hmodule.0))
}

fn register_classes() -> PlatformResult<()> {
    CLASSES
        .get_or_try_init(|| {
            let hinstance = instance()?;
            unsafe {
                let cursor = LoadCursorW(None, IDC_ARROW)?;
                for class_name in [PREVIEW_CLASS, OVERLAY_CLASS] {
                    let wc = WNDCLASSEXW {
                        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                        lpfnWndProc: Some(host_wnd_proc),
                        hInstance: hinstance,
                        hCursor: cursor,
                        lpszClassName: class_name,
                        ..Default::default()
                    };
                    RegisterClassExW(&wc);
                }
            }
            Ok(())
        })
        .map(|_| ())
}

fn frame_style(frame: FrameStyle) -> WINDOW_STYLE {
    match frame {
        FrameStyle::Sizable => WS_POPUP | WS_CAPTION | WS_THICKFRAME | WS_SYSMENU,
        FrameStyle::None => WS_POPUP,
    }
}

/// Attach `state` to `hwnd`; it is freed again on `WM_NCDESTROY`.
unsafe fn attach_state(hwnd: HWND, state: HostState) {
    let raw = Box::into_raw(Box::new(state));
    SetWindowLongPtrW(hwnd, GWLP_USERDATA, raw as isize);
}

unsafe fn state_mut<'a>(hwnd: HWND) -> Option<&'a mut HostState> {
    let raw = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut HostState;
    raw.as_mut()
}

fn window_rect(hwnd: HWND) -> RECT {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetWindowRect(hwnd, &mut rect);
    }
    rect
}

fn client_rect(hwnd: HWND) -> RECT {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut rect);
    }
    rect
}

fn pointer_event(hwnd: HWND, wparam: WPARAM, lparam: LPARAM, button: Option<MouseButton>) -> PointerEvent {
    let mut point = POINT {
        x: (lparam.0 & 0xFFFF) as i16 as i32,
        y: ((lparam.0 >> 16) & 0xFFFF) as i16 as i32,
    };
    unsafe {
        let _ = ClientToScreen(hwnd, &mut point);
    }

    let flags = wparam.0;
    let buttons = MouseButtons {
        left: flags & MK_LBUTTON != 0,
        right: flags & MK_RBUTTON != 0,
        middle: flags & MK_MBUTTON != 0,
    };
    // Mouse messages carry no Alt flag; the high bit of the key state is "down"
    let alt = unsafe { GetKeyState(VK_MENU.0 as i32) } < 0;

    PointerEvent::new(Point::new(point.x, point.y), button, buttons)
        .with_modifiers(key_modifiers(flags, alt))
}

/// Destroy `hwnd` once. Owned windows may already be gone with their owner.
fn destroy(hwnd: &mut HWND) {
    let hwnd = std::mem::take(hwnd);
    if hwnd.is_invalid() {
        return;
    }

    unsafe {
        if IsWindow(hwnd).as_bool() {
            if let Err(e) = DestroyWindow(hwnd) {
                log::warn!("Failed to destroy host {}: {}", from_hwnd(hwnd), e);
            }
        }
    }
}

fn key_modifiers(flags: usize, alt: bool) -> KeyModifiers {
    KeyModifiers {
        ctrl: flags & MK_CONTROL != 0,
        shift: flags & MK_SHIFT != 0,
        alt,
    }
}

unsafe fn paint(hwnd: HWND, state: &HostState) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = BeginPaint(hwnd, &mut ps);

    let rect = client_rect(hwnd);
    let brush = CreateSolidBrush(state.background);
    FillRect(hdc, &rect, brush);
    let _ = DeleteObject(brush);

    if state.kind == HostKind::Overlay && state.caption_visible && !state.caption.is_empty() {
        SetBkMode(hdc, OPAQUE);
        SetBkColor(hdc, CAPTION_BACKGROUND);
        SetTextColor(hdc, CAPTION_TEXT);
        let _ = TextOutW(hdc, CAPTION_MARGIN, CAPTION_MARGIN, &state.caption);
    }

    let _ = EndPaint(hwnd, &ps);
}

unsafe extern "system" fn host_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCDESTROY {
        let raw = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut HostState;
        if !raw.is_null() {
            drop(Box::from_raw(raw));
        }
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    let Some(state) = state_mut(hwnd) else {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    };

    match msg {
        WM_PAINT => {
            paint(hwnd, state);
            LRESULT(0)
        }

        WM_ERASEBKGND => LRESULT(1),

        WM_MOVE if state.kind == HostKind::Preview => {
            let rect = window_rect(hwnd);
            state.send(HostEvent::Moved { location: Point::new(rect.left, rect.top) });
            LRESULT(0)
        }

        WM_SIZE if state.kind == HostKind::Preview => {
            let outer = window_rect(hwnd);
            let client = client_rect(hwnd);
            state.send(HostEvent::Resized {
                outer: Size::new(outer.right - outer.left, outer.bottom - outer.top),
                client: Size::new(client.right - client.left, client.bottom - client.top),
            });
            LRESULT(0)
        }

        WM_GETMINMAXINFO => {
            let info = &mut *(lparam.0 as *mut MINMAXINFO);
            if !state.min_size.is_empty() {
                info.ptMinTrackSize = POINT { x: state.min_size.width, y: state.min_size.height };
            }
            if !state.max_size.is_empty() {
                info.ptMaxTrackSize = POINT { x: state.max_size.width, y: state.max_size.height };
            }
            LRESULT(0)
        }

        WM_MOUSEMOVE => {
            if state.kind == HostKind::Preview && !state.tracking_leave {
                let mut track = TRACKMOUSEEVENT {
                    cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
                    dwFlags: TME_LEAVE,
                    hwndTrack: hwnd,
                    dwHoverTime: 0,
                };
                if TrackMouseEvent(&mut track).is_ok() {
                    state.tracking_leave = true;
                    state.send(HostEvent::PointerEntered);
                }
            }
            state.send(HostEvent::PointerMoved(pointer_event(hwnd, wparam, lparam, None)));
            LRESULT(0)
        }

        WM_MOUSELEAVE => {
            state.tracking_leave = false;
            state.send(HostEvent::PointerLeft);
            LRESULT(0)
        }

        WM_LBUTTONDOWN => {
            state.send(HostEvent::PointerPressed(pointer_event(hwnd, wparam, lparam, Some(MouseButton::Left))));
            LRESULT(0)
        }

        WM_LBUTTONUP => {
            state.send(HostEvent::PointerReleased(pointer_event(hwnd, wparam, lparam, Some(MouseButton::Left))));
            LRESULT(0)
        }

        WM_RBUTTONDOWN => {
            // Keep receiving moves while dragging outside the window
            let _ = SetCapture(hwnd);
            state.send(HostEvent::PointerPressed(pointer_event(hwnd, wparam, lparam, Some(MouseButton::Right))));
            LRESULT(0)
        }

        WM_RBUTTONUP => {
            let _ = ReleaseCapture();
            state.send(HostEvent::PointerReleased(pointer_event(hwnd, wparam, lparam, Some(MouseButton::Right))));
            LRESULT(0)
        }

        WM_HOTKEY => {
            state.send(HostEvent::HotkeyPressed);
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn set_location(hwnd: HWND, location: Point) {
    unsafe {
        let _ = SetWindowPos(hwnd, None, location.x, location.y, 0, 0, SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE);
    }
}

fn set_size(hwnd: HWND, size: Size) {
    unsafe {
        let _ = SetWindowPos(hwnd, None, 0, 0, size.width, size.height, SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE);
    }
}

fn set_topmost(hwnd: HWND, topmost: bool) {
    let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
    unsafe {
        let _ = SetWindowPos(hwnd, insert_after, 0, 0, 0, 0, SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE);
    }
}

fn alpha(opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Tool window that hosts a DWM thumbnail
pub struct Win32PreviewHost {
    hwnd: HWND,
    events: Sender<HostEvent>,
}

impl Win32PreviewHost {
    /// Create a hidden preview window; its notifications arrive on the returned receiver.
    pub fn create(title: &str, bounds: Rect) -> PlatformResult<(Self, Receiver<HostEvent>)> {
        register_classes()?;
        let (events, receiver) = unbounded();

        unsafe {
            let hwnd = CreateWindowExW(
                WS_EX_TOOLWINDOW | WS_EX_LAYERED,
                PREVIEW_CLASS,
                &HSTRING::from(title),
                frame_style(FrameStyle::Sizable),
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height(),
                None,
                None,
                instance()?,
                None,
            )?;

            attach_state(hwnd, HostState::new(HostKind::Preview, events.clone()));
            SetLayeredWindowAttributes(hwnd, COLORREF(0), 255, LWA_ALPHA)?;

            log::debug!("Created preview host {}", from_hwnd(hwnd));
            Ok((Self { hwnd, events }, receiver))
        }
    }
}

impl HostWindow for Win32PreviewHost {
    fn handle(&self) -> WindowHandle {
        from_hwnd(self.hwnd)
    }

    fn show(&mut self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
    }

    fn hide(&mut self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn close(&mut self) {
        destroy(&mut self.hwnd);
    }

    fn set_location(&mut self, location: Point) {
        set_location(self.hwnd, location);
    }

    fn set_size(&mut self, size: Size) {
        set_size(self.hwnd, size);
    }

    fn set_opacity(&mut self, opacity: f64) {
        unsafe {
            let _ = SetLayeredWindowAttributes(self.hwnd, COLORREF(0), alpha(opacity), LWA_ALPHA);
        }
    }

    fn set_topmost(&mut self, topmost: bool) {
        set_topmost(self.hwnd, topmost);
    }
}

impl Drop for Win32PreviewHost {
    fn drop(&mut self) {
        destroy(&mut self.hwnd);
    }
}

impl PreviewHost for Win32PreviewHost {
    fn set_title(&mut self, title: &str) {
        unsafe {
            let _ = SetWindowTextW(self.hwnd, &HSTRING::from(title));
        }
    }

    fn set_frame(&mut self, frame: FrameStyle) {
        unsafe {
            SetWindowLongW(self.hwnd, GWL_STYLE, frame_style(frame).0 as i32);
            let _ = SetWindowPos(
                self.hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    fn chrome(&self) -> Size {
        let outer = window_rect(self.hwnd);
        let client = client_rect(self.hwnd);
        Size::new(
            (outer.right - outer.left) - client.right,
            (outer.bottom - outer.top) - client.bottom,
        )
    }

    fn set_background(&mut self, color: Option<Color>) {
        unsafe {
            if let Some(state) = state_mut(self.hwnd) {
                state.background = color.map(|c| COLORREF(c.to_colorref())).unwrap_or(DEFAULT_BACKGROUND);
            }
            let _ = InvalidateRect(self.hwnd, None, true);
        }
    }

    fn set_size_limits(&mut self, minimum: Size, maximum: Size) {
        unsafe {
            if let Some(state) = state_mut(self.hwnd) {
                state.min_size = minimum;
                state.max_size = maximum;
            }
        }
    }
}

/// Borderless caption layer owned by a preview host
pub struct Win32OverlayHost {
    hwnd: HWND,
}

impl Win32OverlayHost {
    /// Create the overlay for `owner`. Pointer presses on the caption are
    /// reported on the owner's event channel.
    pub fn create(owner: &Win32PreviewHost) -> PlatformResult<Self> {
        register_classes()?;

        unsafe {
            let hwnd = CreateWindowExW(
                WS_EX_TOOLWINDOW | WS_EX_LAYERED | WS_EX_NOACTIVATE,
                OVERLAY_CLASS,
                w!("Thumbview Overlay"),
                WS_POPUP,
                0,
                0,
                0,
                0,
                owner.hwnd,
                None,
                instance()?,
                None,
            )?;

            attach_state(hwnd, HostState::new(HostKind::Overlay, owner.events.clone()));
            SetLayeredWindowAttributes(hwnd, OVERLAY_COLOR_KEY, 255, LWA_COLORKEY | LWA_ALPHA)?;

            Ok(Self { hwnd })
        }
    }
}

impl HostWindow for Win32OverlayHost {
    fn handle(&self) -> WindowHandle {
        from_hwnd(self.hwnd)
    }

    fn show(&mut self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
    }

    fn hide(&mut self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn close(&mut self) {
        destroy(&mut self.hwnd);
    }

    fn set_location(&mut self, location: Point) {
        set_location(self.hwnd, location);
    }

    fn set_size(&mut self, size: Size) {
        set_size(self.hwnd, size);
    }

    fn set_opacity(&mut self, opacity: f64) {
        unsafe {
            let _ = SetLayeredWindowAttributes(
                self.hwnd,
                OVERLAY_COLOR_KEY,
                alpha(opacity),
                LWA_COLORKEY | LWA_ALPHA,
            );
        }
    }

    fn set_topmost(&mut self, topmost: bool) {
        set_topmost(self.hwnd, topmost);
    }
}

impl Drop for Win32OverlayHost {
    fn drop(&mut self) {
        destroy(&mut self.hwnd);
    }
}

impl OverlayHost for Win32OverlayHost {
    fn set_caption(&mut self, caption: &str) {
        unsafe {
            if let Some(state) = state_mut(self.hwnd) {
                state.caption = caption.encode_utf16().collect();
            }
        }
    }

    fn set_caption_visible(&mut self, visible: bool) {
        unsafe {
            if let Some(state) = state_mut(self.hwnd) {
                state.caption_visible = visible;
            }
        }
    }

    fn redraw(&mut self) {
        unsafe {
            let _ = InvalidateRect(self.hwnd, None, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_follow_message_flags_and_alt_state() {
        assert_eq!(key_modifiers(MK_LBUTTON, false), KeyModifiers::NONE);
        assert!(key_modifiers(MK_LBUTTON | MK_CONTROL, false).ctrl_only());

        let ctrl_alt = key_modifiers(MK_LBUTTON | MK_CONTROL, true);
        assert!(ctrl_alt.ctrl && ctrl_alt.alt);
        assert!(!ctrl_alt.ctrl_only());

        assert_eq!(
            key_modifiers(MK_SHIFT, true),
            KeyModifiers { ctrl: false, shift: true, alt: true }
        );
    }

    #[test]
    fn dropping_hosts_destroys_their_windows() {
        let (host, _events) = Win32PreviewHost::create("Thumbview test", Rect::new(0, 0, 160, 90)).unwrap();
        let overlay = Win32OverlayHost::create(&host).unwrap();
        let (host_hwnd, overlay_hwnd) = (host.hwnd, overlay.hwnd);

        drop(overlay);
        assert!(!unsafe { IsWindow(overlay_hwnd) }.as_bool());
        assert!(unsafe { IsWindow(host_hwnd) }.as_bool());

        drop(host);
        assert!(!unsafe { IsWindow(host_hwnd) }.as_bool());
    }

    #[test]
    fn closed_host_drops_quietly_after_its_owner() {
        let (mut host, _events) = Win32PreviewHost::create("Thumbview test", Rect::new(0, 0, 160, 90)).unwrap();
        let mut overlay = Win32OverlayHost::create(&host).unwrap();
        let overlay_hwnd = overlay.hwnd;

        // Destroying the owner takes the owned overlay with it
        host.close();
        assert!(!unsafe { IsWindow(overlay_hwnd) }.as_bool());
        assert!(host.hwnd.is_invalid());

        overlay.close();
        assert!(overlay.hwnd.is_invalid());
        drop(overlay);
        drop(host);
    }
}
