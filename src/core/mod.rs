// Core building blocks shared by the engine and game layers

pub mod math;
pub mod transitions;
