//! End-to-end tests of the server and gateway routers

mod bookings;
mod common;
mod gateway;
mod items;
mod postgres;
mod requests;
mod users;
