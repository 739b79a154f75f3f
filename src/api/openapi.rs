//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, item_requests, items, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt API",
        version = "0.1.0",
        description = "Item sharing service: users lend items, others book them"
    ),
    paths(
        // Health
        health::health_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Items
        items::list_owner_items,
        items::search_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::add_comment,
        // Requests
        item_requests::create_request,
        item_requests::list_own_requests,
        item_requests::list_other_requests,
        item_requests::get_request,
        item_requests::update_request,
        // Bookings
        bookings::create_booking,
        bookings::update_booking_status,
        bookings::get_booking,
        bookings::list_booker_bookings,
        bookings::list_owner_bookings,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Items
            crate::models::item::Item,
            crate::models::item::ItemShort,
            crate::models::item::ItemDetails,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            crate::models::comment::CommentDetails,
            crate::models::comment::CreateComment,
            // Requests
            crate::models::item_request::ItemRequestDetails,
            crate::models::item_request::ItemRequestInput,
            // Bookings
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingShort,
            crate::models::booking::CreateBooking,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "User registry"),
        (name = "items", description = "Item catalog and comments"),
        (name = "requests", description = "Requests for items nobody lists yet"),
        (name = "bookings", description = "Booking lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
