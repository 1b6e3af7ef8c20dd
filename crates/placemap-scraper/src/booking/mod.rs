//! Booking/ordering service menus.
//!
//! Menus for pickup ordering come from a GraphQL endpoint rather than the
//! place page. The valid category set must be fetched first and passed to
//! [`filter_by_category`].

mod filter;
mod parse;
mod request;
mod types;

pub use filter::{booking_menu_records, filter_by_category};
pub use parse::{
    booking_menus_from_menu_groups, booking_menus_from_menu_response, collect_category_ids,
    is_available_on, parse_categories, parse_slot_id,
};
pub use request::{
    categories_request, menu_groups_request, menu_request, order_referer, schedule_request,
    GraphQlOperation, GraphQlRequest,
};
pub use types::{BookingCategory, BookingMenu, MenuPayload};
