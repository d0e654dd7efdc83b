pub mod cover_letter;
pub mod resume;
