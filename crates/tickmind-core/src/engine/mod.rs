mod countdown;

pub use countdown::{CountdownEngine, EngineState};
