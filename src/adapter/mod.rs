//! Rendering surfaces that consume evaluated frames. Nothing here feeds back into evaluation.

pub mod svg;
