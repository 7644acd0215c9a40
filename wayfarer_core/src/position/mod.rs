pub mod fixed_location;
pub mod position_tracker;
pub mod refresh_handle;
