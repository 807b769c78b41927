pub mod textured;
pub mod unlit;
