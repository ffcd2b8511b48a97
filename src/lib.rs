//! OpenGL sample programs and the shader program wrapper they share.

#[macro_use] extern crate clap;

pub mod graphics;
pub mod interface;
