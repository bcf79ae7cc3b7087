//! Previews backed by real Win32 host windows

use crate::{PreviewResult, PreviewWindow, SystemClock};
use crossbeam_channel::Receiver;
use platform::win32::{Win32OverlayHost, Win32PreviewHost, Win32WindowService};
use platform::{HostEvent, PreviewHost, Rect, Size, WindowHandle};
use std::rc::Rc;

pub type Win32Preview =
    PreviewWindow<Rc<Win32WindowService>, Win32PreviewHost, Win32OverlayHost, SystemClock>;

/// Create a hidden preview of `source` with the given outer bounds.
///
/// Host notifications for both the preview and its overlay arrive on the
/// returned receiver; feed them to [`PreviewWindow::handle_event`] from the
/// UI thread.
pub fn create_preview(
    service: Rc<Win32WindowService>,
    source: WindowHandle,
    title: &str,
    bounds: Rect,
) -> PreviewResult<(Win32Preview, Receiver<HostEvent>)> {
    let (host, events) = Win32PreviewHost::create(title, bounds)?;
    let overlay = Win32OverlayHost::create(&host)?;
    let chrome = host.chrome();

    let mut preview = PreviewWindow::new(source, service, host, overlay);
    preview.set_title(title);
    preview.set_location(bounds.origin());
    preview.set_thumbnail_size(Size::new(
        bounds.width() - chrome.width,
        bounds.height() - chrome.height,
    ));

    Ok((preview, events))
}
