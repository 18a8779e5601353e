mod client;
mod geocoding;
mod types;

pub use client::{SearchApi, SerperClient};
pub use geocoding::{Geocoder, OpenCageClient};
pub use types::*;
