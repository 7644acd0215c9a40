pub mod directions;
pub mod errors;
pub mod geo_point;
pub mod map;
pub mod markers;
pub mod position;
pub mod search_bar;
pub mod selection;
pub mod services;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use map::map_controller::MapController;
pub use map::map_options::MapOptions;
pub use map::map_view::{MapScene, MapView, Viewport};
