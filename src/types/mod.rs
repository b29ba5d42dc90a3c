pub mod accidental;
pub mod interval;
pub mod key;
pub mod note;
pub mod pitch;
