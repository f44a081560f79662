// Core algorithm exports
pub mod encoding;
pub mod features;
pub mod pricing;
pub mod route;
pub mod schedule;

pub use encoding::{EncodingError, OneHot};
pub use features::encode_itinerary;
pub use pricing::{format_rupees, inverse_log_fare};
pub use route::{city_coordinates, RouteMapper};
pub use schedule::{days_left, today_local};
