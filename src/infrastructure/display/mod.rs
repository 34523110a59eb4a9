//! Display query adapters

mod static_display;

pub use static_display::StaticDisplay;
