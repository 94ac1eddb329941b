pub mod effect;
pub mod stage;
pub mod synth;

#[cfg(feature = "sound")]
pub mod device;
