//! I/O utilities for syndrome data.
//!
//! Provides functions for reading flagged-ancilla lists written as text and
//! for reading and writing packed syndrome shots (.b8 files) used by the
//! host tools. These utilities handle file format parsing and conversion to
//! the coordinate sets the decoder consumes.

/// File loading utilities for packed syndrome shots.
///
/// Reads and writes .b8 files, where each shot is one bit per ancilla of a
/// fixed, sorted ancilla list, padded to a whole number of bytes. Converts
/// between those bits and flagged-ancilla sets.
pub mod loader;

/// Parser for text syndrome descriptions.
///
/// Parses whitespace-separated coordinates, written `(i, j)` or `i,j`, one or
/// more per line, with `#` comment lines. Also parses the single-coordinate
/// arguments accepted on the command line.
pub mod parser;
