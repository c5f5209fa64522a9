use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaDevices,
    MediaStream, MediaStreamConstraints, Window,
};

use super::super::{FrameSize, MediaCapture, PlatformError, VideoConstraints, VideoSink};
use super::{cast, create_element, document, js_error};
use crate::bridge::capture::RasterSurface;

/// `navigator.mediaDevices`
pub struct WebMediaCapture {
    window: Window,
}

impl WebMediaCapture {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn devices(&self) -> Option<MediaDevices> {
        let devices = js_sys::Reflect::get(&self.window.navigator(), &"mediaDevices".into()).ok()?;
        if devices.is_undefined() || devices.is_null() {
            return None;
        }
        Some(devices.unchecked_into())
    }
}

fn stream_constraints(constraints: VideoConstraints) -> Result<MediaStreamConstraints, JsValue> {
    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"width".into(), &constraints.width.into())?;
    let request = js_sys::Object::new();
    js_sys::Reflect::set(&request, &"audio".into(), &constraints.audio.into())?;
    js_sys::Reflect::set(&request, &"video".into(), &video)?;
    Ok(request.unchecked_into())
}

#[async_trait(?Send)]
impl MediaCapture for WebMediaCapture {
    fn is_available(&self) -> bool {
        self.devices().is_some()
    }

    async fn open_video(
        &self,
        constraints: VideoConstraints,
    ) -> Result<Box<dyn VideoSink>, PlatformError> {
        let devices = self
            .devices()
            .ok_or_else(|| PlatformError::Unavailable("media capture".into()))?;
        let request = stream_constraints(constraints).map_err(js_error)?;
        let pending = devices
            .get_user_media_with_constraints(&request)
            .map_err(js_error)?;
        let stream: MediaStream = cast(JsFuture::from(pending).await.map_err(js_error)?)?;

        let document = document(&self.window)?;
        let video: HtmlVideoElement = create_element(&document, "video")?;
        video.set_src_object(Some(&stream));
        Ok(Box::new(WebVideoSink { document, video }))
    }
}

/// Offscreen `<video>` playing a camera stream
pub struct WebVideoSink {
    document: web_sys::Document,
    video: HtmlVideoElement,
}

#[async_trait(?Send)]
impl VideoSink for WebVideoSink {
    async fn metadata_ready(&self) -> Result<(), PlatformError> {
        let loaded = js_sys::Promise::new(&mut |resolve, _reject| {
            self.video.set_onloadedmetadata(Some(&resolve));
        });
        let result = JsFuture::from(loaded).await;
        self.video.set_onloadedmetadata(None);
        result.map(|_| ()).map_err(js_error)
    }

    fn play(&self) -> Result<(), PlatformError> {
        // Resolves once frames flow; the current frame is drawable before that.
        self.video.play().map(|_| ()).map_err(js_error)
    }

    fn native_size(&self) -> FrameSize {
        FrameSize {
            width: self.video.video_width(),
            height: self.video.video_height(),
        }
    }

    fn draw_frame(&self, surface: &mut RasterSurface) -> Result<(), PlatformError> {
        let FrameSize { width, height } = surface.size();
        let canvas: HtmlCanvasElement = create_element(&self.document, "canvas")?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = cast(
            canvas
                .get_context("2d")
                .map_err(js_error)?
                .ok_or_else(|| PlatformError::Unavailable("2d canvas context".into()))?,
        )?;
        let (w, h) = (f64::from(width), f64::from(height));
        context
            .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, w, h)
            .map_err(js_error)?;
        let frame = context.get_image_data(0.0, 0.0, w, h).map_err(js_error)?;
        surface.copy_from_rgba(&frame.data().0)
    }
}
