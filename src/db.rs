pub mod item_repo;
pub use item_repo::ItemRepository;
pub mod point_repo;
pub use point_repo::PointRepository;
