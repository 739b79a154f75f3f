//! Business logic services

pub mod bookings;
pub mod comments;
pub mod item_requests;
pub mod items;
pub mod users;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub items: items::ItemsService,
    pub requests: item_requests::ItemRequestsService,
    pub bookings: bookings::BookingsService,
    pub comments: comments::CommentsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            users: users::UsersService::new(repository.clone()),
            items: items::ItemsService::new(repository.clone()),
            requests: item_requests::ItemRequestsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone()),
            comments: comments::CommentsService::new(repository),
        }
    }
}
