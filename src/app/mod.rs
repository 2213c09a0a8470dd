//! Application orchestration — terminal events feeding the grid widget.

pub mod event;
