//! UI primitives: buttons, inputs, panels and feedback.

pub mod button;
pub mod feedback;
pub mod input;
pub mod panel;

pub use button::*;
pub use feedback::*;
pub use input::*;
pub use panel::*;
