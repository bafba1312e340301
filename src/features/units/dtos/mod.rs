mod unit_dto;

pub use unit_dto::{
    CreateUnitDto, ListUnitsQuery, ReorderUnitsDto, UnitResponseDto, UpdateUnitDto,
};
