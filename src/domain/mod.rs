//! Domain layer: pure formatting and validation rules, the step schema and the
//! wizard state value, plus the ports the application layer drives.

pub mod format;
pub mod ports;
pub mod schema;
pub mod state;
pub mod validation;
