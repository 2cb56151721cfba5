pub mod bell;
pub mod list;
