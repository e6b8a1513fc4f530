pub mod db;
pub mod email;
pub mod identity;
pub mod places;
