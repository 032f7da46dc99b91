use std::collections::HashMap;
use std::sync::Arc;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use log::{debug, info, warn};
use parking_lot::Mutex;
use thiserror::Error;

use crate::util::task;

/// Errors that can occur while loading an image source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageLoadError {
    #[error("{0} is not an image file")]
    NotAnImage(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("could not read {0}")]
    Unreadable(String),
}

/// Decode encoded image bytes (PNG, JPEG, ...) into RGBA pixels
pub fn decode_image(bytes: &[u8]) -> Result<ColorImage, ImageLoadError> {
    let image = image::load_from_memory(bytes).map_err(|err| ImageLoadError::Decode(err.to_string()))?;
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice()))
}

enum Slot {
    Decoding,
    Ready {
        image: Arc<ColorImage>,
        // Uploaded lazily; dropped first when the cache is over budget
        texture: Option<TextureHandle>,
    },
    Failed,
}

type DecodeInbox = Arc<Mutex<Vec<(String, Result<ColorImage, ImageLoadError>)>>>;

/// Decoded image sources and their textures, keyed by source key.
///
/// Decoding runs off the UI thread; until it finishes, [`ImageCache::texture_id`]
/// returns `None` and the renderer skips the image for that frame.
pub struct ImageCache {
    slots: HashMap<String, Slot>,
    /// Tracks when each texture was last drawn
    last_used: HashMap<String, u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of textures to keep uploaded
    max_cache_size: usize,
    inbox: DecodeInbox,
}

impl ImageCache {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            slots: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Start decoding `bytes` under `key` without blocking. Returns false if
    /// the key is already known.
    pub fn request(&mut self, key: &str, bytes: Vec<u8>, ctx: &Context) -> bool {
        if self.slots.contains_key(key) {
            return false;
        }
        self.slots.insert(key.to_owned(), Slot::Decoding);

        let inbox = Arc::clone(&self.inbox);
        let ctx = ctx.clone();
        let key = key.to_owned();
        debug!("Decoding image {} ({} bytes)", key, bytes.len());
        task::spawn(move || async move {
            let result = decode_image(&bytes);
            inbox.lock().push((key, result));
            ctx.request_repaint();
        });
        true
    }

    /// Move finished decodes into the cache. Returns how many became ready.
    pub fn poll(&mut self) -> usize {
        let finished: Vec<_> = std::mem::take(&mut *self.inbox.lock());
        let mut ready = 0;
        for (key, result) in finished {
            // Forgotten while decoding
            if !self.slots.contains_key(&key) {
                continue;
            }
            match result {
                Ok(image) => {
                    self.insert_decoded(&key, image);
                    ready += 1;
                }
                Err(err) => {
                    warn!("Image {} failed to load: {}", key, err);
                    self.slots.insert(key, Slot::Failed);
                }
            }
        }
        ready
    }

    /// Store already-decoded pixels under `key`
    pub fn insert_decoded(&mut self, key: &str, image: ColorImage) {
        info!("Image {} ready: {}x{}", key, image.size[0], image.size[1]);
        self.slots.insert(
            key.to_owned(),
            Slot::Ready {
                image: Arc::new(image),
                texture: None,
            },
        );
    }

    /// Texture for a decoded source, uploading it on first use
    pub fn texture_id(&mut self, key: &str, ctx: &Context) -> Option<TextureId> {
        let needs_upload = match self.slots.get(key)? {
            Slot::Ready { texture, .. } => texture.is_none(),
            Slot::Decoding | Slot::Failed => return None,
        };

        if needs_upload {
            self.prune_cache_if_needed();
        }

        let Some(Slot::Ready { image, texture }) = self.slots.get_mut(key) else {
            return None;
        };
        let handle = texture.get_or_insert_with(|| {
            let name = format!("design_image_{key}");
            ctx.load_texture(name, (**image).clone(), TextureOptions::LINEAR)
        });
        let id = handle.id();
        self.last_used.insert(key.to_owned(), self.current_frame);
        Some(id)
    }

    pub fn is_pending(&self, key: &str) -> bool {
        matches!(self.slots.get(key), Some(Slot::Decoding))
    }

    pub fn is_ready(&self, key: &str) -> bool {
        matches!(self.slots.get(key), Some(Slot::Ready { .. }))
    }

    pub fn is_failed(&self, key: &str) -> bool {
        matches!(self.slots.get(key), Some(Slot::Failed))
    }

    /// Pixel size of a decoded source
    pub fn image_size(&self, key: &str) -> Option<[usize; 2]> {
        match self.slots.get(key)? {
            Slot::Ready { image, .. } => Some(image.size),
            _ => None,
        }
    }

    /// Drop a source and its texture
    pub fn forget(&mut self, key: &str) {
        if self.slots.remove(key).is_some() {
            debug!("Forgot image {}", key);
        }
        self.last_used.remove(key);
    }

    /// Drop every source for which `keep` returns false
    pub fn retain_sources(&mut self, keep: impl Fn(&str) -> bool) {
        let stale: Vec<String> = self.slots.keys().filter(|key| !keep(key.as_str())).cloned().collect();
        for key in stale {
            self.forget(&key);
        }
    }

    /// Number of sources currently holding an uploaded texture
    pub fn texture_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready { texture: Some(_), .. }))
            .count()
    }

    /// Releases the least recently drawn textures so that one more upload
    /// stays within budget. Decoded pixels are kept for re-upload.
    fn prune_cache_if_needed(&mut self) {
        let count = self.texture_count();
        if count < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(String, u64)> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Ready { texture: Some(_), .. }))
            .map(|(key, _)| (key.clone(), self.last_used.get(key).copied().unwrap_or(0)))
            .collect();

        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = count + 1 - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            if let Some(Slot::Ready { texture, .. }) = self.slots.get_mut(&key) {
                *texture = None;
            }
            self.last_used.remove(&key);
        }
    }
}
