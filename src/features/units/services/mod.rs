mod unit_service;

pub use unit_service::UnitService;
