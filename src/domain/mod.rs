//! Value objects and entities exchanged with the back-office API.

pub mod contract;
pub mod customer;
pub mod list_query;
pub mod merchant;
pub mod resource;
pub mod staff;
pub mod types;
