pub mod bit_string;
pub mod data_value;
pub mod date_time;
pub mod object_id;

pub use bit_string::BitString;
pub use data_value::DataValue;
pub use date_time::{Date, Time, EPOCH_YEAR, UNSPECIFIED};
pub use object_id::ObjectId;
