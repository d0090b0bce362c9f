pub mod error;
pub mod map;
pub mod satellites;
pub mod track;
