//! JSON output of rendered views

use crate::view::RenderedView;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, view: &RenderedView) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, view)?;
    writeln!(writer)
}
