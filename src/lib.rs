//! placemarks - Parse saved-places KML exports and enrich them with reverse-geocoded addresses

pub mod api;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod kml;
pub mod pipeline;
pub mod places;
