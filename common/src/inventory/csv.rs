use std::io::Write;

use super::{HEADERS, Row};

/// A CSV report. The header line is written on creation.
pub struct CsvInventory<W: Write> {
    writer: ::csv::Writer<W>,
}

impl<W: Write> CsvInventory<W> {
    pub fn new(inner: W) -> ::csv::Result<Self> {
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(HEADERS)?;
        Ok(Self { writer })
    }

    pub fn write_row(&mut self, row: &Row) -> ::csv::Result<()> {
        self.writer.serialize(row)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> std::io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
