pub mod item_service;
pub use item_service::ItemService;
pub mod point_service;
pub use point_service::PointService;
