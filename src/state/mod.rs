pub mod navigation;
pub mod selection;

pub use navigation::NavigationState;
pub use selection::{SelectionMode, SelectionSet};
