//! Browser-side video element management.
//!
//! `HtmlVideoElement` is not `Send + Sync`, so elements live in a
//! thread-local slot map keyed by the id stored on the owning
//! `VideoSurface`. The wasm build of Bevy runs the main world on one
//! thread, which is the only place these functions are called from.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use bevy::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

struct VideoSlot {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

thread_local! {
    static SLOTS: RefCell<HashMap<u32, VideoSlot>> = RefCell::new(HashMap::new());
    static NEXT_SLOT: Cell<u32> = const { Cell::new(0) };
}

/// Create a looping, muted, inline `<video>` plus the readback canvas its
/// frames are copied through. Returns `None` when the DOM is unavailable.
pub fn acquire(source: &str, size: UVec2) -> Option<u32> {
    let document = web_sys::window()?.document()?;

    let video: HtmlVideoElement = document
        .create_element("video")
        .ok()?
        .dyn_into()
        .ok()?;
    video.set_src(source);
    video.set_cross_origin(Some("anonymous"));
    video.set_loop(true);
    video.set_muted(true);
    let _ = video.set_attribute("playsinline", "");

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .ok()?
        .dyn_into()
        .ok()?;
    canvas.set_width(size.x);
    canvas.set_height(size.y);
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()??
        .dyn_into()
        .ok()?;

    let slot = NEXT_SLOT.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    SLOTS.with(|slots| {
        slots.borrow_mut().insert(
            slot,
            VideoSlot {
                video,
                canvas,
                context,
            },
        );
    });
    Some(slot)
}

pub fn play(slot: u32, source: &str) {
    let promise = SLOTS.with(|slots| {
        slots
            .borrow()
            .get(&slot)
            .map(|entry| entry.video.play())
    });
    match promise {
        Some(Ok(promise)) => {
            let source = source.to_string();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(error) = JsFuture::from(promise).await {
                    warn!("Video autoplay prevented for {source}: {error:?}");
                }
            });
        }
        Some(Err(error)) => warn!("Video play() failed for {source}: {error:?}"),
        None => {}
    }
}

pub fn pause(slot: u32) {
    SLOTS.with(|slots| {
        if let Some(entry) = slots.borrow().get(&slot) {
            let _ = entry.video.pause();
        }
    });
}

/// Pause and forget the element; the browser reclaims it once dropped.
pub fn release(slot: u32) {
    SLOTS.with(|slots| {
        if let Some(entry) = slots.borrow_mut().remove(&slot) {
            let _ = entry.video.pause();
            entry.video.set_src("");
        }
    });
}

/// Copy the current video frame into `image` via the readback canvas.
/// Skipped until the element has decoded at least one frame.
pub fn copy_frame(slot: u32, image: &mut Image) -> bool {
    const HAVE_CURRENT_DATA: u16 = 2;

    SLOTS.with(|slots| {
        let slots = slots.borrow();
        let Some(entry) = slots.get(&slot) else {
            return false;
        };
        if entry.video.ready_state() < HAVE_CURRENT_DATA {
            return false;
        }

        let width = entry.canvas.width();
        let height = entry.canvas.height();
        if entry
            .context
            .draw_image_with_html_video_element_and_dw_and_dh(
                &entry.video,
                0.0,
                0.0,
                width as f64,
                height as f64,
            )
            .is_err()
        {
            return false;
        }

        match entry
            .context
            .get_image_data(0.0, 0.0, width as f64, height as f64)
        {
            Ok(frame) => {
                image.data = Some(frame.data().0);
                true
            }
            Err(error) => {
                let message: JsValue = error;
                warn!("Video frame readback failed: {message:?}");
                false
            }
        }
    })
}
