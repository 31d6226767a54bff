//=========================================================================
// Graphics Types
//=========================================================================
//
// Renderer-independent value types used by scenes when drawing.
//
//=========================================================================

mod color;

pub use color::Color;
