use std::io::Write;
use serde::Serialize;
use crate::Result;

/// Writes records as a tab-separated table: the preamble verbatim, then a
/// header row taken from the record field names, then one row per record.
pub struct TsvExporter<I: Iterator> {
    preamble: String,
    record_iter: I,
}

impl<T, I: Iterator<Item=T>> TsvExporter<I>
    where T: Serialize
{
    pub fn new(preamble: String, record_iter: I) -> TsvExporter<I> {
        TsvExporter { preamble, record_iter }
    }

    pub fn write_all<W: Write>(&mut self, mut writer: W) -> Result<()> {
        write!(&mut writer, "{}", self.preamble)?;

        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(true)
            .delimiter(b'\t')
            .from_writer(writer);
        for record in &mut self.record_iter {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
