pub mod db;
pub mod table;

pub use db::Database;
pub use table::TABLE_NAME;
