//! Route modules organized by surface.

pub mod bookings;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod health;
