pub mod marker;
pub mod marker_store;
