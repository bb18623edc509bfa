pub mod dynamic;
pub mod input;
pub mod machine;
pub mod state;

pub use dynamic::{resolve_dynamic_submenu, DynamicError};
pub use input::{nav_input_from_key, parse_scripted_keys, NavInput, NavKeyPress};
pub use machine::{
    complete_dynamic, fail_dynamic, navigate, ActionRequest, DynamicRequest, NavContext,
    NavEffect, NavSignal, NavTransition,
};
pub use state::NavigationState;
