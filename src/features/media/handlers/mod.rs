pub mod media_handler;

pub use media_handler::{
    delete_media, get_media_info, upload_image, upload_images, upload_unit_assets,
};
