pub mod month_view;
pub mod render;
pub mod theme;

pub use month_view::*;
pub use render::*;
pub use theme::*;
