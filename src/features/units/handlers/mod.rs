pub mod unit_handler;

pub use unit_handler::{
    create_unit, delete_unit, get_unit, list_units, reorder_units, update_unit,
};
