use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{handlers as auth_handlers, model as auth_model};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers};
use crate::features::units::{dtos as units_dtos, handlers as units_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::auth_handler::get_me,
        // Categories
        categories_handlers::category_handler::create_category,
        categories_handlers::category_handler::list_categories,
        categories_handlers::category_handler::get_category,
        categories_handlers::category_handler::update_category,
        categories_handlers::category_handler::delete_category,
        // Units
        units_handlers::unit_handler::create_unit,
        units_handlers::unit_handler::list_units,
        units_handlers::unit_handler::get_unit,
        units_handlers::unit_handler::update_unit,
        units_handlers::unit_handler::delete_unit,
        units_handlers::unit_handler::reorder_units,
        // Media
        media_handlers::media_handler::upload_image,
        media_handlers::media_handler::upload_images,
        media_handlers::media_handler::upload_unit_assets,
        media_handlers::media_handler::delete_media,
        media_handlers::media_handler::get_media_info,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::UserRole,
            auth_model::AccountStatus,
            auth_model::AuthenticatedUser,
            ApiResponse<auth_model::AuthenticatedUser>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Units
            units_dtos::CreateUnitDto,
            units_dtos::UpdateUnitDto,
            units_dtos::ReorderUnitsDto,
            units_dtos::UnitResponseDto,
            ApiResponse<units_dtos::UnitResponseDto>,
            ApiResponse<Vec<units_dtos::UnitResponseDto>>,
            // Media
            media_dtos::UploadImageDto,
            media_dtos::UploadImagesDto,
            media_dtos::MediaAssetDto,
            media_dtos::UnitAssetsDto,
            media_dtos::DeleteMediaDto,
            media_dtos::DeleteMediaResponseDto,
            media_dtos::MediaInfoDto,
            ApiResponse<media_dtos::MediaAssetDto>,
            ApiResponse<Vec<media_dtos::MediaAssetDto>>,
            ApiResponse<media_dtos::UnitAssetsDto>,
            ApiResponse<media_dtos::DeleteMediaResponseDto>,
            ApiResponse<media_dtos::MediaInfoDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authenticated session introspection"),
        (name = "categories", description = "Course category management"),
        (name = "units", description = "Course unit management and ordering"),
        (name = "media", description = "Image upload and asset management"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CourseDeck Admin API",
        version = "0.1.0",
        description = "API documentation for the CourseDeck admin panel",
    )
)]
pub struct ApiDoc;

/// Adds the access-token cookie security scheme to the OpenAPI spec.
/// Registers the default cookie name; [`CookieAuthModifier`] rewrites it
/// from config at startup.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("accessToken"))),
            );
        }
    }
}

/// Modifier that points the `cookie_auth` scheme at the configured cookie,
/// so the docs track `AUTH_COOKIE_NAME` instead of a hardcoded default
pub struct CookieAuthModifier {
    pub cookie_name: String,
}

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    self.cookie_name.clone(),
                ))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme_cookie_name(openapi: &utoipa::openapi::OpenApi) -> Option<String> {
        let components = openapi.components.as_ref()?;
        match components.security_schemes.get("cookie_auth")? {
            SecurityScheme::ApiKey(ApiKey::Cookie(value)) => Some(value.name.clone()),
            _ => None,
        }
    }

    #[test]
    fn security_scheme_follows_the_configured_cookie_name() {
        let mut openapi = ApiDoc::openapi();
        assert_eq!(scheme_cookie_name(&openapi).as_deref(), Some("accessToken"));

        CookieAuthModifier {
            cookie_name: "sessionToken".to_string(),
        }
        .modify(&mut openapi);

        assert_eq!(
            scheme_cookie_name(&openapi).as_deref(),
            Some("sessionToken")
        );
    }
}
