use std::io::Cursor;
use std::sync::Arc;

use egui::{Align2, Color32, Id, LayerId, Order, TextStyle, Vec2};
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::image_cache::ImageLoadError;
use crate::util::task;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Raw file contents waiting to be checked
#[derive(Debug, Clone)]
struct IncomingFile {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

/// An image file that passed the format check, with its pixel dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    /// Unique key the pixels are cached under
    pub source_key: String,
    pub bytes: Vec<u8>,
    pub size: Vec2,
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(name: &str, mime: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    std::path::Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Read the pixel dimensions from the image header without decoding
pub fn probe_dimensions(bytes: &[u8]) -> Result<Vec2, ImageLoadError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| ImageLoadError::Unreadable(err.to_string()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|err| ImageLoadError::Decode(err.to_string()))?;
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Decode(format!("empty image ({width}x{height})")));
    }
    Ok(Vec2::new(width as f32, height as f32))
}

/// Collects image files from drag-and-drop and the file picker.
///
/// Both sources land in the same inbox; the app drains it once per frame
/// with [`FileHandler::take_loaded_images`].
pub struct FileHandler {
    inbox: Arc<Mutex<Vec<IncomingFile>>>,
    next_key: usize,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            inbox: Arc::new(Mutex::new(Vec::new())),
            next_key: 1,
        }
    }

    /// Queue any files dropped onto the window this frame.
    /// Returns how many were queued.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> usize {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut queued = 0;

        for file in dropped {
            let name = if let Some(path) = &file.path {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            let bytes = if let Some(bytes) = &file.bytes {
                Some(bytes.to_vec())
            } else if let Some(path) = &file.path {
                read_path(path)
            } else {
                warn!("Dropped file has no accessible data: {}", name);
                None
            };

            if let Some(bytes) = bytes {
                self.enqueue(name, file.mime.clone(), bytes);
                queued += 1;
            }
        }

        queued
    }

    /// Open the platform image picker. The chosen file shows up in a later
    /// [`FileHandler::take_loaded_images`].
    pub fn open_image_picker(&self, ctx: &egui::Context) {
        let inbox = Arc::clone(&self.inbox);
        let ctx = ctx.clone();
        task::spawn(move || async move {
            let picked = rfd::AsyncFileDialog::new()
                .set_title("Add image")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await;

            if let Some(handle) = picked {
                let name = handle.file_name();
                let bytes = handle.read().await;
                info!("Picked image {} ({} bytes)", name, bytes.len());
                inbox.lock().push(IncomingFile {
                    name,
                    mime: String::new(),
                    bytes,
                });
                ctx.request_repaint();
            }
        });
    }

    pub(crate) fn enqueue(&self, name: String, mime: String, bytes: Vec<u8>) {
        debug!("Queued file {} ({} bytes)", name, bytes.len());
        self.inbox.lock().push(IncomingFile { name, mime, bytes });
    }

    /// Drain queued files, keeping the ones that are readable images.
    /// Anything else is logged and dropped.
    pub fn take_loaded_images(&mut self) -> Vec<LoadedImage> {
        let incoming: Vec<IncomingFile> = std::mem::take(&mut *self.inbox.lock());
        let mut loaded = Vec::with_capacity(incoming.len());

        for file in incoming {
            if !is_image_file(&file.name, &file.mime) {
                warn!("{}", ImageLoadError::NotAnImage(file.name));
                continue;
            }
            match probe_dimensions(&file.bytes) {
                Ok(size) => {
                    let source_key = format!("{}#{}", file.name, self.next_key);
                    self.next_key += 1;
                    loaded.push(LoadedImage {
                        source_key,
                        bytes: file.bytes,
                        size,
                    });
                }
                Err(err) => warn!("Ignoring {}: {}", file.name, err),
            }
        }

        loaded
    }

    /// Dim the window and list the files while they are dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop to add images:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                } else {
                    text += "\n(unnamed file)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_path(path: &std::path::Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!("{}: {}", ImageLoadError::Unreadable(path.display().to_string()), err);
            None
        }
    }
}

// The browser hands over bytes, never paths
#[cfg(target_arch = "wasm32")]
fn read_path(path: &std::path::Path) -> Option<Vec<u8>> {
    warn!("File path access not supported on the web: {}", path.display());
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::new(width, height);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn recognises_images_by_mime_then_extension() {
        assert!(is_image_file("photo.PNG", ""));
        assert!(is_image_file("blob", "image/jpeg"));
        assert!(!is_image_file("photo.png", "text/plain"));
        assert!(!is_image_file("notes.txt", ""));
        assert!(!is_image_file("no_extension", ""));
    }

    #[test]
    fn probe_reads_header_dimensions() {
        assert_eq!(probe_dimensions(&png_bytes(7, 3)).unwrap(), Vec2::new(7.0, 3.0));
        assert!(probe_dimensions(b"not an image").is_err());
    }

    #[test]
    fn non_images_are_dropped_from_the_inbox() {
        let mut handler = FileHandler::new();
        handler.enqueue("notes.txt".to_owned(), String::new(), b"hello".to_vec());
        handler.enqueue("broken.png".to_owned(), String::new(), b"garbage".to_vec());
        handler.enqueue("logo.png".to_owned(), String::new(), png_bytes(4, 2));

        let loaded = handler.take_loaded_images();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].source_key.starts_with("logo.png"));
        assert_eq!(loaded[0].size, Vec2::new(4.0, 2.0));
        assert!(handler.take_loaded_images().is_empty());
    }

    #[test]
    fn same_file_twice_gets_distinct_keys() {
        let mut handler = FileHandler::new();
        handler.enqueue("logo.png".to_owned(), String::new(), png_bytes(1, 1));
        handler.enqueue("logo.png".to_owned(), String::new(), png_bytes(1, 1));
        let loaded = handler.take_loaded_images();
        assert_ne!(loaded[0].source_key, loaded[1].source_key);
    }
}
