pub mod map_controller;
pub mod map_options;
pub mod map_state;
pub mod map_view;
pub mod popup;
