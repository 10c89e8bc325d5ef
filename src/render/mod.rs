pub mod bar;
pub mod path;
pub mod powerline;
pub mod segmented;
pub mod theme;

#[allow(unused_imports)]
pub use bar::BarStyle;
#[allow(unused_imports)]
pub use powerline::Powerline;
#[allow(unused_imports)]
pub use theme::Theme;
