pub mod auth_handlers;
pub mod pet_handlers;
