pub mod dispatch;
pub mod economic;
pub mod extract;
pub mod import;
pub mod listing;
pub mod regenerate;
pub mod reset;
pub mod schema;
pub mod score;
pub mod shared;
