//! Preview window: one companion window mirroring one source window

use crate::callbacks::{PreviewCallbacks, PreviewNotification};
use crate::geometry::{overlay_bounds, thumbnail_destination, zoom_location, ZoomAnchor};
use crate::overlay::{Overlay, OverlayPhase};
use crate::settings::{Highlight, PreviewSettings};
use crate::state::{Interaction, Lifecycle, ZoomSnapshot};
use crate::suppress::{Clock, ResizeSuppressor, SystemClock};
use crate::PreviewResult;
use log::{debug, trace};
use platform::{
    FrameStyle, HostEvent, Hotkey, HotkeyId, MouseButton, OverlayHost, Point, PointerEvent,
    PreviewHost, Size, ThumbnailProjection, WindowHandle, WindowService,
};

/// Live preview of a single source window.
///
/// Geometry changes only set dirty flags; [`PreviewWindow::refresh`] applies
/// them to the projection and the overlay. All methods must be called from
/// the thread that owns the host windows.
pub struct PreviewWindow<S, H, O, C = SystemClock>
where
    S: WindowService,
    H: PreviewHost,
    O: OverlayHost,
    C: Clock,
{
    id: WindowHandle,
    service: S,
    host: H,
    overlay: Overlay<O>,
    clock: C,
    thumbnail: Option<S::Thumbnail>,
    callbacks: PreviewCallbacks,

    title: String,
    lifecycle: Lifecycle,
    interaction: Interaction,

    location: Point,
    client_size: Size,
    chrome: Size,
    minimum_size: Size,
    maximum_size: Size,

    opacity: f64,
    frame: FrameStyle,
    topmost: bool,
    overlay_enabled: bool,
    highlight: Highlight,
    zoom_anchor: ZoomAnchor,
    zoom_factor: u32,

    location_changed: bool,
    size_changed: bool,
    suppressor: ResizeSuppressor,

    snapshot: Option<ZoomSnapshot>,
    base_pointer: Point,
    hotkey: Option<(Hotkey, HotkeyId)>,
}

impl<S, H, O> PreviewWindow<S, H, O, SystemClock>
where
    S: WindowService,
    H: PreviewHost,
    O: OverlayHost,
{
    /// Create a hidden preview of `id` drawn into `host`.
    pub fn new(id: WindowHandle, service: S, host: H, overlay: O) -> Self {
        Self::with_clock(id, service, host, overlay, SystemClock)
    }
}

impl<S, H, O, C> PreviewWindow<S, H, O, C>
where
    S: WindowService,
    H: PreviewHost,
    O: OverlayHost,
    C: Clock,
{
    pub fn with_clock(id: WindowHandle, service: S, host: H, overlay: O, clock: C) -> Self {
        let chrome = host.chrome();
        let mut suppressor = ResizeSuppressor::default();
        suppressor.suppress(clock.now());

        let defaults = PreviewSettings::default();

        debug!("Created preview {} for source {}", host.handle(), id);

        Self {
            id,
            service,
            host,
            overlay: Overlay::new(overlay),
            clock,
            thumbnail: None,
            callbacks: PreviewCallbacks::default(),
            title: String::new(),
            lifecycle: Lifecycle::Constructed,
            interaction: Interaction::Idle,
            location: Point::default(),
            client_size: Size::default(),
            chrome,
            minimum_size: Size::default(),
            maximum_size: Size::default(),
            opacity: defaults.opacity,
            frame: FrameStyle::Sizable,
            topmost: defaults.topmost,
            overlay_enabled: defaults.overlay_enabled,
            highlight: defaults.highlight,
            zoom_anchor: defaults.zoom_anchor,
            zoom_factor: defaults.zoom_factor,
            location_changed: true,
            size_changed: true,
            suppressor,
            snapshot: None,
            base_pointer: Point::default(),
            hotkey: None,
        }
    }

    /// Source window handle this preview mirrors
    pub fn id(&self) -> WindowHandle {
        self.id
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn overlay(&self) -> &Overlay<O> {
        &self.overlay
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn callbacks_mut(&mut self) -> &mut PreviewCallbacks {
        &mut self.callbacks
    }

    /// Shorthand for registering a callback slot.
    pub fn on(&mut self, notification: PreviewNotification, callback: impl FnMut(WindowHandle) + 'static) {
        self.callbacks.set(notification, callback);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.host.set_title(title);
        self.overlay.set_caption(title);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_custom_mode_active(&self) -> bool {
        self.interaction.is_custom()
    }

    pub fn zoom_snapshot(&self) -> Option<ZoomSnapshot> {
        self.snapshot
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }

    pub fn is_size_changed(&self) -> bool {
        self.size_changed
    }

    pub fn is_location_changed(&self) -> bool {
        self.location_changed
    }

    /// True if `handle` is the source, the preview host or its overlay.
    pub fn is_known_handle(&self, handle: WindowHandle) -> bool {
        handle == self.id || handle == self.host.handle() || handle == self.overlay.handle()
    }

    // Geometry

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn set_location(&mut self, location: Point) {
        self.location = location;
        self.location_changed = true;
        self.host.set_location(location);
    }

    /// Client area size
    pub fn thumbnail_size(&self) -> Size {
        self.client_size
    }

    pub fn set_thumbnail_size(&mut self, size: Size) {
        self.apply_outer_size(Size::new(
            size.width + self.chrome.width,
            size.height + self.chrome.height,
        ));
    }

    pub fn outer_size(&self) -> Size {
        Size::new(
            self.client_size.width + self.chrome.width,
            self.client_size.height + self.chrome.height,
        )
    }

    pub fn minimum_size(&self) -> Size {
        self.minimum_size
    }

    pub fn maximum_size(&self) -> Size {
        self.maximum_size
    }

    /// Outer size limits. A zero dimension leaves that dimension unconstrained.
    pub fn set_size_limits(&mut self, minimum: Size, maximum: Size) {
        self.minimum_size = minimum;
        self.maximum_size = maximum;
        self.host.set_size_limits(minimum, maximum);

        let current = self.outer_size();
        if self.clamp_outer(current) != current {
            self.apply_outer_size(current);
        }
    }

    fn clamp_outer(&self, size: Size) -> Size {
        fn clamp(value: i32, min: i32, max: i32) -> i32 {
            let value = if min > 0 { value.max(min) } else { value };
            if max > 0 {
                value.min(max)
            } else {
                value
            }
        }

        Size::new(
            clamp(size.width, self.minimum_size.width, self.maximum_size.width),
            clamp(size.height, self.minimum_size.height, self.maximum_size.height),
        )
    }

    /// Resize the host to `outer` within the limits and return the size applied.
    fn apply_outer_size(&mut self, outer: Size) -> Size {
        let outer = self.clamp_outer(outer);
        let client = Size::new(
            (outer.width - self.chrome.width).max(0),
            (outer.height - self.chrome.height).max(0),
        );

        if client != self.client_size {
            self.client_size = client;
            self.size_changed = true;
        }
        self.host.set_size(outer);
        outer
    }

    // Appearance

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
        self.host.set_opacity(opacity);
        self.overlay.set_owner_opacity(opacity);
    }

    pub fn frames_visible(&self) -> bool {
        self.frame == FrameStyle::Sizable
    }

    pub fn set_frames(&mut self, enable: bool) {
        let style = if enable { FrameStyle::Sizable } else { FrameStyle::None };
        if self.frame == style {
            return;
        }

        self.suppress_resize_events();

        self.host.set_frame(style);
        self.frame = style;
        self.chrome = self.host.chrome();

        // Keep the client area; the outer size absorbs the new chrome
        self.apply_outer_size(self.outer_size());
        self.size_changed = true;
    }

    pub fn is_topmost(&self) -> bool {
        self.topmost
    }

    pub fn set_topmost(&mut self, topmost: bool) {
        if self.topmost == topmost {
            return;
        }

        self.host.set_topmost(topmost);
        self.overlay.set_topmost(topmost);
        self.topmost = topmost;
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        if self.highlight == highlight {
            return;
        }

        self.host
            .set_background(highlight.enabled.then_some(highlight.color));
        self.highlight = highlight;
        self.size_changed = true;
    }

    pub fn is_overlay_enabled(&self) -> bool {
        self.overlay_enabled
    }

    /// Takes effect on the next refresh.
    pub fn set_overlay_enabled(&mut self, enabled: bool) {
        self.overlay_enabled = enabled;
    }

    pub fn zoom_anchor(&self) -> ZoomAnchor {
        self.zoom_anchor
    }

    pub fn zoom_factor(&self) -> u32 {
        self.zoom_factor
    }

    /// Apply a whole configuration at once.
    pub fn apply_settings(&mut self, settings: &PreviewSettings) -> PreviewResult<()> {
        settings.validate()?;

        self.set_opacity(settings.opacity);
        self.set_frames(settings.show_frames);
        self.set_topmost(settings.topmost);
        self.set_overlay_enabled(settings.overlay_enabled);
        self.set_highlight(settings.highlight);
        self.set_size_limits(settings.minimum_size, settings.maximum_size);
        self.zoom_anchor = settings.zoom_anchor;
        self.zoom_factor = settings.zoom_factor;

        if self.hotkey() != settings.hotkey {
            self.register_hotkey(settings.hotkey)?;
        }

        Ok(())
    }

    // Lifecycle

    pub fn show(&mut self) -> PreviewResult<()> {
        self.suppress_resize_events();

        self.host.show();

        self.location_changed = true;
        self.size_changed = true;
        self.overlay.reset();

        self.refresh(true)?;

        self.lifecycle = Lifecycle::Shown;
        debug!("Shown preview for {}", self.id);
        Ok(())
    }

    pub fn hide(&mut self) {
        self.suppress_resize_events();

        self.lifecycle = Lifecycle::Hidden;

        self.overlay.hide();
        self.host.hide();
        debug!("Hidden preview for {}", self.id);
    }

    /// Tear the preview down: hotkey, projection, overlay, then the host.
    pub fn close(mut self) {
        self.unregister_hotkey();

        if let Some(mut thumbnail) = self.thumbnail.take() {
            thumbnail.release();
        }

        self.overlay.close();
        self.host.close();
        debug!("Closed preview for {}", self.id);
    }

    /// Apply pending geometry changes.
    ///
    /// A forced refresh registers a fresh projection and releases the old one
    /// only once the new one is in place. If that registration fails the old
    /// projection stays installed.
    pub fn refresh(&mut self, force: bool) -> PreviewResult<()> {
        let obsolete = if force { self.thumbnail.take() } else { None };

        if self.thumbnail.is_none() {
            match self.service.register_thumbnail(self.host.handle(), self.id) {
                Ok(thumbnail) => {
                    debug!("Registered projection {} -> {}", self.id, self.host.handle());
                    self.thumbnail = Some(thumbnail);
                }
                Err(e) => {
                    self.thumbnail = obsolete;
                    return Err(e.into());
                }
            }
        }

        let size_changed = self.size_changed || force;
        let location_changed = self.location_changed || force;

        if size_changed {
            let destination = thumbnail_destination(self.client_size, self.highlight.border());
            if let Some(thumbnail) = self.thumbnail.as_mut() {
                thumbnail.retarget(destination);
            }
            self.size_changed = false;
        }

        if let Some(mut thumbnail) = obsolete {
            thumbnail.release();
            debug!("Released replaced projection for {}", self.id);
        }

        self.overlay.set_enabled(self.overlay_enabled);

        match self.overlay.phase() {
            OverlayPhase::NeverShown => self.overlay.show(),
            OverlayPhase::Shown if !(size_changed || location_changed) => return Ok(()),
            OverlayPhase::Shown => {}
        }

        let (location, size) = overlay_bounds(self.location, self.outer_size(), self.client_size);
        self.location_changed = false;
        self.overlay.set_bounds(location, size);
        self.overlay.refresh();

        Ok(())
    }

    fn suppress_resize_events(&mut self) {
        self.suppressor.suppress(self.clock.now());
    }

    // Zoom

    fn take_snapshot(&mut self) -> ZoomSnapshot {
        let snapshot = ZoomSnapshot {
            size: self.outer_size(),
            location: self.location,
            maximum_size: self.maximum_size,
        };
        self.snapshot = Some(snapshot);
        snapshot
    }

    fn restore_snapshot(&mut self, snapshot: ZoomSnapshot) {
        self.apply_outer_size(snapshot.size);
        self.maximum_size = snapshot.maximum_size;
        self.host.set_size_limits(self.minimum_size, self.maximum_size);
        self.set_location(snapshot.location);
    }

    /// Enlarge the client area `factor` times, keeping `anchor` in place.
    ///
    /// Sizes are computed from the hover snapshot, so repeated calls do not
    /// compound. Ignored during a manual drag.
    pub fn zoom_in(&mut self, anchor: ZoomAnchor, factor: u32) {
        if self.interaction.is_custom() {
            return;
        }

        let snapshot = match self.snapshot {
            Some(snapshot) => snapshot,
            None => self.take_snapshot(),
        };

        let factor = i32::try_from(factor.max(1)).unwrap_or(i32::MAX);
        let base_client = Size::new(
            snapshot.size.width - self.chrome.width,
            snapshot.size.height - self.chrome.height,
        );
        let target = Size::new(
            factor
                .saturating_mul(base_client.width)
                .saturating_add(self.chrome.width),
            factor
                .saturating_mul(base_client.height)
                .saturating_add(self.chrome.height),
        );

        // Size before location, or the move can retrigger hover and zoom again
        self.maximum_size = Size::default();
        self.host.set_size_limits(self.minimum_size, self.maximum_size);
        let applied = self.apply_outer_size(target);

        let location = zoom_location(anchor, snapshot.location, snapshot.size, applied);
        if location != self.location {
            self.set_location(location);
        }

        trace!(
            "Zoomed preview for {} to {}x{} at ({}, {})",
            self.id,
            applied.width,
            applied.height,
            location.x,
            location.y
        );
        self.interaction = Interaction::ZoomedIn;
    }

    /// Restore size, maximum size and location from the last snapshot.
    pub fn zoom_out(&mut self) {
        if let Some(snapshot) = self.snapshot {
            self.restore_snapshot(snapshot);
        }

        if self.interaction.is_zoomed() {
            self.interaction = Interaction::Idle;
        }
    }

    // Hotkey

    pub fn hotkey(&self) -> Option<Hotkey> {
        self.hotkey.map(|(hotkey, _)| hotkey)
    }

    /// Replace the current binding. `None` only clears it.
    pub fn register_hotkey(&mut self, hotkey: Option<Hotkey>) -> PreviewResult<()> {
        self.unregister_hotkey();

        let Some(hotkey) = hotkey else {
            return Ok(());
        };

        let id = self.service.register_hotkey(self.host.handle(), hotkey)?;
        debug!("Bound {} to preview for {}", hotkey, self.id);
        self.hotkey = Some((hotkey, id));
        Ok(())
    }

    pub fn unregister_hotkey(&mut self) {
        if let Some((hotkey, id)) = self.hotkey.take() {
            self.service.unregister_hotkey(self.host.handle(), id);
            debug!("Unbound {} from preview for {}", hotkey, self.id);
        }
    }

    /// Hotkey press: activates the source. Always consumes the event.
    pub fn hotkey_pressed(&mut self) -> bool {
        self.emit(PreviewNotification::Activated);
        true
    }

    // Host notifications

    /// Route a host notification. Returns true when the event was consumed.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::Moved { location } => self.handle_moved(location),
            HostEvent::Resized { outer, client } => self.handle_resized(outer, client),
            HostEvent::PointerEntered => self.pointer_entered(),
            HostEvent::PointerLeft => self.pointer_left(),
            HostEvent::PointerPressed(pointer) => self.pointer_pressed(pointer),
            HostEvent::PointerMoved(pointer) => self.pointer_moved(pointer),
            HostEvent::PointerReleased(pointer) => self.pointer_released(pointer),
            HostEvent::HotkeyPressed => return self.hotkey_pressed(),
        }
        false
    }

    pub fn handle_moved(&mut self, location: Point) {
        self.location = location;
        self.location_changed = true;
        self.emit(PreviewNotification::Moved);
    }

    pub fn handle_resized(&mut self, outer: Size, client: Size) {
        if self.suppressor.is_suppressed(self.clock.now()) {
            trace!("Ignored resize of preview for {}", self.id);
            return;
        }

        self.chrome = Size::new(outer.width - client.width, outer.height - client.height);
        self.client_size = client;
        self.size_changed = true;
        self.emit(PreviewNotification::Resized);
    }

    pub fn pointer_entered(&mut self) {
        self.exit_custom_mode();
        self.take_snapshot();
        self.emit(PreviewNotification::Focused);
    }

    pub fn pointer_left(&mut self) {
        self.emit(PreviewNotification::LostFocus);
    }

    pub fn pointer_pressed(&mut self, pointer: PointerEvent) {
        match pointer.button {
            Some(MouseButton::Left) if !pointer.buttons.right => {
                if pointer.modifiers.ctrl_only() {
                    self.emit(PreviewNotification::Deactivated);
                } else {
                    self.emit(PreviewNotification::Activated);
                }
            }
            Some(MouseButton::Left) | Some(MouseButton::Right) => {
                self.enter_custom_mode(pointer.position)
            }
            _ => {}
        }
    }

    pub fn pointer_moved(&mut self, pointer: PointerEvent) {
        if !self.interaction.is_custom() {
            return;
        }

        let dx = pointer.position.x - self.base_pointer.x;
        let dy = pointer.position.y - self.base_pointer.y;
        self.base_pointer = pointer.position;

        if pointer.buttons.left && pointer.buttons.right {
            let outer = self.outer_size();
            let applied = self.apply_outer_size(Size::new(outer.width + dx, outer.height + dy));
            if let Some(snapshot) = self.snapshot.as_mut() {
                snapshot.size = applied;
            }
        } else if pointer.buttons.right {
            let location = self.location.offset(dx, dy);
            self.set_location(location);
            if let Some(snapshot) = self.snapshot.as_mut() {
                snapshot.location = location;
            }
        }
    }

    pub fn pointer_released(&mut self, pointer: PointerEvent) {
        if pointer.button == Some(MouseButton::Right) {
            self.exit_custom_mode();
        }
    }

    fn enter_custom_mode(&mut self, position: Point) {
        let snapshot = match self.snapshot {
            Some(snapshot) => snapshot,
            None => self.take_snapshot(),
        };
        self.restore_snapshot(snapshot);

        self.interaction = Interaction::Custom;
        self.base_pointer = position;
    }

    fn exit_custom_mode(&mut self) {
        if self.interaction.is_custom() {
            self.interaction = Interaction::Idle;
        }
    }

    fn emit(&mut self, notification: PreviewNotification) {
        self.callbacks.emit(notification, self.id);
    }
}
