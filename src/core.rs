pub mod document;
pub mod flatten;
pub mod layout;
pub mod record;

pub use self::{
    flatten::{flatten, flatten_demand, flatten_production},
    layout::{Kind, Layout},
    record::Record,
};
