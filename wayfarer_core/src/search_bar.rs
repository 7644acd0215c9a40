use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    geo_point::GeoPoint,
    services::{
        geocoding::Geocoder,
        places::{LocationBias, PlaceSearch, PlaceSelection, PlaceSuggestion},
    },
};

pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 800.0 * 1000.0;

/// Place search biased towards the user, resolving picks to a recenter point.
pub struct SearchBar<M> {
    maps: Arc<M>,
    radius_meters: f64,
}

impl<M> SearchBar<M>
where
    M: Geocoder + PlaceSearch,
{
    pub fn new(maps: Arc<M>, radius_meters: f64) -> Self {
        Self {
            maps,
            radius_meters,
        }
    }

    pub fn location_bias(&self, user_position: Option<GeoPoint>) -> Option<LocationBias> {
        user_position.map(|center| LocationBias {
            center,
            radius_meters: self.radius_meters,
        })
    }

    pub async fn suggest(
        &self,
        input: &str,
        user_position: Option<GeoPoint>,
    ) -> Vec<PlaceSuggestion> {
        let bias = self.location_bias(user_position);

        match self.maps.autocomplete(input, bias).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                warn!("Place suggestions for {:?} failed: {}", input, err);
                Vec::new()
            }
        }
    }

    /// `None` when the place cannot be geocoded; the map then stays where it is.
    pub async fn on_place_selected(&self, selection: &PlaceSelection) -> Option<GeoPoint> {
        match self.maps.geocode_address(&selection.address).await {
            Ok(results) => match results.first() {
                Some(result) => {
                    debug!("Resolved {:?} to {}", selection.address, result.location);
                    Some(result.location)
                }
                None => {
                    warn!("No geocode result for {:?}", selection.address);
                    None
                }
            },
            Err(err) => {
                warn!("Geocoding {:?} failed: {}", selection.address, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::ServiceError,
        test_utils::{FakeMaps, geocode_result, point},
    };

    use super::*;

    fn selection(address: &str) -> PlaceSelection {
        PlaceSelection {
            address: address.to_string(),
        }
    }

    #[test]
    fn test_bias_uses_user_position() {
        let search = SearchBar::new(Arc::new(FakeMaps::default()), DEFAULT_SEARCH_RADIUS_METERS);

        let bias = search.location_bias(Some(point(6.45, 3.40))).unwrap();
        assert_eq!(bias.center, point(6.45, 3.40));
        assert_eq!(bias.radius_meters, 800_000.0);

        assert_eq!(search.location_bias(None), None);
    }

    #[tokio::test]
    async fn test_suggest_passes_bias() {
        let maps = Arc::new(FakeMaps::default());
        maps.set_suggestions(vec![PlaceSuggestion {
            description: "Lekki, Lagos".to_string(),
        }]);
        let search = SearchBar::new(maps.clone(), DEFAULT_SEARCH_RADIUS_METERS);

        let suggestions = search.suggest("lek", Some(point(6.45, 3.40))).await;

        assert_eq!(suggestions.len(), 1);
        let bias = maps.last_bias().unwrap();
        assert_eq!(bias.center, point(6.45, 3.40));

        search.suggest("lek", None).await;
        assert_eq!(maps.last_bias(), None);
    }

    #[tokio::test]
    async fn test_selected_place_resolves_to_first_result() {
        let maps = Arc::new(FakeMaps::default());
        maps.add_address(
            "Lekki, Lagos",
            vec![
                geocode_result("Lekki, Lagos, Nigeria", &["Lekki"], point(6.44, 3.47)),
                geocode_result("Lekki Phase 1", &["Lekki Phase 1"], point(6.43, 3.46)),
            ],
        );
        let search = SearchBar::new(maps, DEFAULT_SEARCH_RADIUS_METERS);

        let center = search.on_place_selected(&selection("Lekki, Lagos")).await;

        assert_eq!(center, Some(point(6.44, 3.47)));
    }

    #[tokio::test]
    async fn test_failed_geocode_is_a_noop() {
        let maps = Arc::new(FakeMaps::default());
        let search = SearchBar::new(maps.clone(), DEFAULT_SEARCH_RADIUS_METERS);

        assert_eq!(search.on_place_selected(&selection("Nowhere")).await, None);

        maps.fail_address("Broken", ServiceError::Transport("connection reset".to_string()));
        assert_eq!(search.on_place_selected(&selection("Broken")).await, None);
    }
}
