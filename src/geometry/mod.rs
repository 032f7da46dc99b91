pub mod garment;
pub mod hit_testing;

pub use garment::GarmentOutline;
pub use hit_testing::{RESIZE_HANDLE_RADIUS, element_at, handle_at, resized_rect};
