pub mod format;
pub mod list;
pub mod show;
pub mod status;
pub mod sync;
pub mod view;
