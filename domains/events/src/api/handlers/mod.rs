pub mod events;
pub mod forms;
