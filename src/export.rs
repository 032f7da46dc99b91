//! PNG and PDF export of the rendered canvas.
//!
//! The canvas is captured with a viewport screenshot of the frame in which
//! the selection overlay was hidden, cropped to the canvas rectangle, then
//! encoded. Delivery is a save dialog natively and a download on the web.

use std::io::Cursor;

use egui::{Color32, ColorImage, Context, Rect};
use log::{debug, error, info, warn};
use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};
use thiserror::Error;

use crate::config::PdfPageConfig;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export: the canvas capture is empty")]
    EmptyCapture,
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("writing export failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

/// Cut the canvas out of a full-viewport screenshot.
///
/// `canvas_rect` is in points; the screenshot is in physical pixels.
/// Returns `None` when the rectangle misses the screenshot entirely.
pub fn crop_capture(screenshot: &ColorImage, canvas_rect: Rect, pixels_per_point: f32) -> Option<ColorImage> {
    let [width, height] = screenshot.size;
    let to_px = |v: f32, max: usize| ((v * pixels_per_point).round().max(0.0) as usize).min(max);

    let x0 = to_px(canvas_rect.min.x, width);
    let y0 = to_px(canvas_rect.min.y, height);
    let x1 = to_px(canvas_rect.max.x, width);
    let y1 = to_px(canvas_rect.max.y, height);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let mut pixels = Vec::with_capacity((x1 - x0) * (y1 - y0));
    for y in y0..y1 {
        let row = y * width;
        pixels.extend_from_slice(&screenshot.pixels[row + x0..row + x1]);
    }
    Some(ColorImage {
        size: [x1 - x0, y1 - y0],
        pixels,
    })
}

fn check_not_empty(capture: &ColorImage) -> Result<(), ExportError> {
    if capture.size[0] == 0 || capture.size[1] == 0 || capture.pixels.is_empty() {
        Err(ExportError::EmptyCapture)
    } else {
        Ok(())
    }
}

/// Encode a capture as PNG
pub fn encode_png(capture: &ColorImage) -> Result<Vec<u8>, ExportError> {
    check_not_empty(capture)?;

    let rgba: Vec<u8> = capture
        .pixels
        .iter()
        .flat_map(|color| color.to_srgba_unmultiplied())
        .collect();
    let image = image::RgbaImage::from_raw(capture.size[0] as u32, capture.size[1] as u32, rgba)
        .ok_or(ExportError::EmptyCapture)?;

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Flatten onto white; PDF image XObjects here carry no alpha
fn to_rgb_over_white(color: Color32) -> [u8; 3] {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let blend = |c: u8| ((c as u32 * a as u32 + 255 * (255 - a as u32)) / 255) as u8;
    [blend(r), blend(g), blend(b)]
}

/// Where the capture lands on the page: scaled to fit inside the margins,
/// centred. Returns (x, y, width, height) in PDF points, origin bottom-left.
pub fn pdf_placement(capture_size: [usize; 2], page: &PdfPageConfig) -> (f32, f32, f32, f32) {
    let (w, h) = (capture_size[0] as f32, capture_size[1] as f32);
    let avail_w = (page.width_pt - 2.0 * page.margin_pt).max(1.0);
    let avail_h = (page.height_pt - 2.0 * page.margin_pt).max(1.0);
    let scale = (avail_w / w).min(avail_h / h);
    let (draw_w, draw_h) = (w * scale, h * scale);
    (
        (page.width_pt - draw_w) / 2.0,
        (page.height_pt - draw_h) / 2.0,
        draw_w,
        draw_h,
    )
}

/// Embed a capture into a single fixed-size PDF page
pub fn encode_pdf(capture: &ColorImage, page: &PdfPageConfig) -> Result<Vec<u8>, ExportError> {
    check_not_empty(capture)?;
    let [width, height] = capture.size;

    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let rgb: Vec<u8> = capture.pixels.iter().flat_map(|c| to_rgb_over_white(*c)).collect();
    let mut image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb,
    );
    // Falls back to the raw stream if deflate fails
    if let Err(err) = image_stream.compress() {
        debug!("Image stream left uncompressed: {}", err);
    }
    let image_id = doc.add_object(image_stream);

    let (x, y, draw_w, draw_h) = pdf_placement(capture.size, page);
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    draw_w.into(),
                    0.0f32.into(),
                    0.0f32.into(),
                    draw_h.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
        "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), page.width_pt.into(), page.height_pt.into()],
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Encode a capture in the requested format
pub fn encode(format: ExportFormat, capture: &ColorImage, page: &PdfPageConfig) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Png => encode_png(capture),
        ExportFormat::Pdf => encode_pdf(capture, page),
    }
}

/// Tracks an export between the request and the screenshot that answers it
#[derive(Debug, Default)]
pub struct ExportAdapter {
    pending: Option<ExportFormat>,
}

impl ExportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the viewport for a screenshot of the next painted frame
    pub fn request(&mut self, format: ExportFormat, ctx: &Context) {
        if self.pending.is_some() {
            warn!("Export already in progress; ignoring {:?} request", format);
            return;
        }
        info!("Exporting design as {:?}", format);
        self.pending = Some(format);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        ctx.request_repaint();
    }

    /// True while waiting for the capture. The selection overlay is hidden
    /// during this time so it doesn't end up in the file.
    pub fn is_capturing(&self) -> bool {
        self.pending.is_some()
    }

    /// Pick up a screenshot delivered this frame, encode it and hand the
    /// bytes to the platform. Returns the format that finished, if any.
    pub fn handle_screenshot(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        page: &PdfPageConfig,
        file_stem: &str,
    ) -> Option<ExportFormat> {
        let format = self.pending?;
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        })?;
        self.pending = None;

        let pixels_per_point = ctx.pixels_per_point();
        let Some(capture) = crop_capture(&screenshot, canvas_rect, pixels_per_point) else {
            warn!("Canvas is not visible; nothing exported");
            return None;
        };

        match encode(format, &capture, page) {
            Ok(bytes) => {
                info!("Encoded {} ({} bytes)", format.file_name(file_stem), bytes.len());
                deliver(format, bytes, file_stem);
                Some(format)
            }
            Err(err) => {
                error!("Export failed: {}", err);
                None
            }
        }
    }
}

/// Save dialog, then write the file
#[cfg(not(target_arch = "wasm32"))]
pub fn deliver(format: ExportFormat, bytes: Vec<u8>, file_stem: &str) {
    let file_name = format.file_name(file_stem);
    crate::util::task::spawn(move || async move {
        let dialog = rfd::AsyncFileDialog::new()
            .set_title("Export design")
            .set_file_name(&file_name)
            .add_filter(format.extension().to_uppercase(), &[format.extension()]);

        if let Some(handle) = dialog.save_file().await {
            match std::fs::write(handle.path(), &bytes) {
                Ok(()) => info!("Exported design to: {:?}", handle.path()),
                Err(err) => error!("{}", ExportError::from(err)),
            }
        }
    });
}

/// Browser download via a temporary object URL
#[cfg(target_arch = "wasm32")]
pub fn deliver(format: ExportFormat, bytes: Vec<u8>, file_stem: &str) {
    use eframe::wasm_bindgen::JsCast as _;

    let file_name = format.file_name(file_stem);
    let result = (|| -> Result<(), eframe::wasm_bindgen::JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(format.mime_type());
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)?;

        let anchor = document
            .create_element("a")?
            .dyn_into::<web_sys::HtmlAnchorElement>()?;
        anchor.set_href(&url);
        anchor.set_download(&file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url)?;
        Ok(())
    })();

    match result {
        Ok(()) => info!("Downloaded {}", file_name),
        Err(err) => error!("Download of {} failed: {:?}", file_name, err),
    }
}
