pub mod color;
pub mod emitter;
pub mod particle;
pub mod template;
