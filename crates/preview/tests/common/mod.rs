#![allow(dead_code)]

use platform::{
    Color, FrameStyle, HostWindow, Hotkey, HotkeyId, OverlayHost, PlatformError, PlatformResult,
    Point, PreviewHost, Rect, Size, ThumbnailProjection, WindowHandle, WindowService,
};
use preview::{Clock, PreviewWindow};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const SOURCE: WindowHandle = WindowHandle(0x100);
pub const HOST: WindowHandle = WindowHandle(0x200);
pub const OVERLAY: WindowHandle = WindowHandle(0x300);

/// Chrome of the sizable frame: 8px side borders, 31px title bar
pub const SIZABLE_CHROME: Size = Size { width: 16, height: 39 };

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register(u32),
    Retarget(u32, Rect),
    Release(u32),
    HotkeyRegistered(Hotkey, HotkeyId),
    HotkeyUnregistered(HotkeyId),

    HostShow,
    HostHide,
    HostClose,
    HostTitle(String),
    HostFrame(FrameStyle),
    HostSize(Size),
    HostLocation(Point),
    HostLimits(Size, Size),
    HostBackground(Option<Color>),
    HostOpacity(f64),
    HostTopmost(bool),

    OverlayShow,
    OverlayHide,
    OverlayClose,
    OverlayCaption(String),
    OverlayCaptionVisible(bool),
    OverlaySize(Size),
    OverlayLocation(Point),
    OverlayOpacity(f64),
    OverlayTopmost(bool),
    OverlayRedraw,
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|call| predicate(call)).count()
    }

    pub fn contains(&self, call: &Call) -> bool {
        self.0.borrow().contains(call)
    }
}

/// Journals every `release` call, repeated ones included
pub struct FakeThumbnail {
    serial: u32,
    journal: Journal,
}

impl FakeThumbnail {
    pub fn serial(&self) -> u32 {
        self.serial
    }
}

impl ThumbnailProjection for FakeThumbnail {
    fn retarget(&mut self, destination: Rect) {
        self.journal.push(Call::Retarget(self.serial, destination));
    }

    fn release(&mut self) {
        self.journal.push(Call::Release(self.serial));
    }
}

#[derive(Clone, Default)]
pub struct FakeService {
    journal: Journal,
    serials: Rc<Cell<u32>>,
    hotkey_ids: Rc<Cell<HotkeyId>>,
    fail_registration: Rc<Cell<bool>>,
}

impl FakeService {
    pub fn fail_registration(&self, fail: bool) {
        self.fail_registration.set(fail);
    }
}

impl WindowService for FakeService {
    type Thumbnail = FakeThumbnail;

    fn is_composition_enabled(&self) -> bool {
        true
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        None
    }

    fn activate(&self, _handle: WindowHandle) {}

    fn minimize(&self, _handle: WindowHandle, _animate: bool) {}

    fn move_window(&self, _handle: WindowHandle, _left: i32, _top: i32, _width: i32, _height: i32) {}

    fn maximize(&self, _handle: WindowHandle) {}

    fn position(&self, _handle: WindowHandle) -> Rect {
        Rect::default()
    }

    fn is_maximized(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn is_minimized(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn register_thumbnail(
        &self,
        _destination: WindowHandle,
        _source: WindowHandle,
    ) -> PlatformResult<FakeThumbnail> {
        if self.fail_registration.get() {
            return Err(PlatformError::ThumbnailRegistration("source is gone".into()));
        }

        let serial = self.serials.get() + 1;
        self.serials.set(serial);
        self.journal.push(Call::Register(serial));

        Ok(FakeThumbnail {
            serial,
            journal: self.journal.clone(),
        })
    }

    fn register_hotkey(&self, _owner: WindowHandle, hotkey: Hotkey) -> PlatformResult<HotkeyId> {
        let id = self.hotkey_ids.get() + 1;
        self.hotkey_ids.set(id);
        self.journal.push(Call::HotkeyRegistered(hotkey, id));
        Ok(id)
    }

    fn unregister_hotkey(&self, _owner: WindowHandle, id: HotkeyId) {
        self.journal.push(Call::HotkeyUnregistered(id));
    }
}

pub struct FakePreviewHost {
    journal: Journal,
    pub frame: FrameStyle,
    pub visible: bool,
    pub size: Size,
    pub location: Point,
    pub limits: (Size, Size),
    pub background: Option<Color>,
}

impl HostWindow for FakePreviewHost {
    fn handle(&self) -> WindowHandle {
        HOST
    }

    fn show(&mut self) {
        self.visible = true;
        self.journal.push(Call::HostShow);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.journal.push(Call::HostHide);
    }

    fn close(&mut self) {
        self.journal.push(Call::HostClose);
    }

    fn set_location(&mut self, location: Point) {
        self.location = location;
        self.journal.push(Call::HostLocation(location));
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.journal.push(Call::HostSize(size));
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.journal.push(Call::HostOpacity(opacity));
    }

    fn set_topmost(&mut self, topmost: bool) {
        self.journal.push(Call::HostTopmost(topmost));
    }
}

impl PreviewHost for FakePreviewHost {
    fn set_title(&mut self, title: &str) {
        self.journal.push(Call::HostTitle(title.to_string()));
    }

    fn set_frame(&mut self, frame: FrameStyle) {
        self.frame = frame;
        self.journal.push(Call::HostFrame(frame));
    }

    fn chrome(&self) -> Size {
        match self.frame {
            FrameStyle::Sizable => SIZABLE_CHROME,
            FrameStyle::None => Size::new(0, 0),
        }
    }

    fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
        self.journal.push(Call::HostBackground(color));
    }

    fn set_size_limits(&mut self, minimum: Size, maximum: Size) {
        self.limits = (minimum, maximum);
        self.journal.push(Call::HostLimits(minimum, maximum));
    }
}

pub struct FakeOverlayHost {
    journal: Journal,
    pub visible: bool,
    pub caption_visible: bool,
    pub opacity: f64,
}

impl HostWindow for FakeOverlayHost {
    fn handle(&self) -> WindowHandle {
        OVERLAY
    }

    fn show(&mut self) {
        self.visible = true;
        self.journal.push(Call::OverlayShow);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.journal.push(Call::OverlayHide);
    }

    fn close(&mut self) {
        self.journal.push(Call::OverlayClose);
    }

    fn set_location(&mut self, location: Point) {
        self.journal.push(Call::OverlayLocation(location));
    }

    fn set_size(&mut self, size: Size) {
        self.journal.push(Call::OverlaySize(size));
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
        self.journal.push(Call::OverlayOpacity(opacity));
    }

    fn set_topmost(&mut self, topmost: bool) {
        self.journal.push(Call::OverlayTopmost(topmost));
    }
}

impl OverlayHost for FakeOverlayHost {
    fn set_caption(&mut self, caption: &str) {
        self.journal.push(Call::OverlayCaption(caption.to_string()));
    }

    fn set_caption_visible(&mut self, visible: bool) {
        self.caption_visible = visible;
        self.journal.push(Call::OverlayCaptionVisible(visible));
    }

    fn redraw(&mut self) {
        self.journal.push(Call::OverlayRedraw);
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

pub type TestPreview = PreviewWindow<FakeService, FakePreviewHost, FakeOverlayHost, ManualClock>;

pub struct Fixture {
    pub preview: TestPreview,
    pub journal: Journal,
    pub service: FakeService,
    pub clock: ManualClock,
}

/// A hidden preview with a 200x100 client area at (500, 300).
pub fn fixture() -> Fixture {
    let journal = Journal::default();
    let service = FakeService {
        journal: journal.clone(),
        ..Default::default()
    };
    let host = FakePreviewHost {
        journal: journal.clone(),
        frame: FrameStyle::Sizable,
        visible: false,
        size: Size::default(),
        location: Point::default(),
        limits: (Size::default(), Size::default()),
        background: None,
    };
    let overlay = FakeOverlayHost {
        journal: journal.clone(),
        visible: false,
        caption_visible: false,
        opacity: 1.0,
    };
    let clock = ManualClock::new();

    let mut preview =
        PreviewWindow::with_clock(SOURCE, service.clone(), host, overlay, clock.clone());
    preview.set_thumbnail_size(Size::new(200, 100));
    preview.set_location(Point::new(500, 300));
    journal.clear();

    Fixture {
        preview,
        journal,
        service,
        clock,
    }
}

/// Record every callback of `window` into a shared log.
pub fn record_notifications(
    window: &mut TestPreview,
) -> Rc<RefCell<Vec<(preview::PreviewNotification, WindowHandle)>>> {
    use preview::PreviewNotification::*;

    let log = Rc::new(RefCell::new(Vec::new()));
    for notification in [Moved, Resized, Focused, LostFocus, Activated, Deactivated] {
        let sink = log.clone();
        window.on(notification, move |id| sink.borrow_mut().push((notification, id)));
    }
    log
}
