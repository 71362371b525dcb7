mod helvetica;
mod pdf_writer;

pub use pdf_writer::LopdfRenderer;
