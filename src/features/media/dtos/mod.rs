mod media_dto;

pub use media_dto::{
    extension_for, is_image_type_allowed, DeleteMediaDto, DeleteMediaResponseDto, MediaAssetDto,
    MediaInfoDto, MediaInfoQuery, UnitAssetsDto, UploadImageDto, UploadImagesDto,
    ALLOWED_IMAGE_MIME_TYPES, GALLERY_FIELD, GALLERY_MAX_FILES, MAX_BATCH_IMAGES, MAX_IMAGE_SIZE,
};
