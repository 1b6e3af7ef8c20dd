pub mod booking;
pub mod business_hours;
pub mod classify;
pub mod client;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod menu;
pub mod place;
pub(crate) mod rate_limit;
pub mod search;

pub use business_hours::{extract_business_hours, find_business_hours, normalize_business_hours};
pub use classify::{classify_category, CategoryClassifier};
pub use client::{Endpoints, PlaceClient};
pub use dedup::{dedup_menus, MenuIdentity};
pub use encoding::{clean_image_url, fix_encoding, normalize_image_url};
pub use error::ScraperError;
pub use extract::{extract_array, extract_object};
pub use menu::{extract_menu, extract_menu_board_images, to_menu_records, DecodeProfile};
pub use place::{extract_keyword_list, extract_place_detail};
pub use search::{parse_menu_info, parse_search_places, MenuInfoItem, SearchPlace};
