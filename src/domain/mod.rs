pub mod accessibility;
pub mod calendar;
pub mod calendar_list;
pub mod date;
pub mod date_range;
pub mod day_state;
pub mod marking;
pub mod page;

pub use accessibility::*;
pub use calendar::*;
pub use calendar_list::*;
pub use date::*;
pub use date_range::*;
pub use day_state::*;
pub use marking::*;
pub use page::*;
