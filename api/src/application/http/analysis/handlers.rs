pub mod analyze_image;
pub mod delete_record;
pub mod list_history;
