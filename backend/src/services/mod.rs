//! Business logic services for the Farm Dashboard backend

pub mod crop;
pub mod farm;
pub mod pages;
pub mod records;
pub mod task;
pub mod transaction;
pub mod weather;

pub use crop::CropService;
pub use farm::FarmService;
pub use pages::PageService;
pub use task::TaskService;
pub use transaction::TransactionService;
pub use weather::WeatherService;
