use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use awsinv_common::inventory::Row;
use awsinv_common::inventory::csv::CsvInventory;
use awsinv_core::sink::RowSink;

use crate::terminal::spinner;

/// Writes rows to a CSV report.
///
/// The file is created with the first row, or on finish for an empty run, so
/// a rejected selection leaves nothing behind. With `sort`, rows are held
/// until finish and written ordered by unique asset identifier.
pub struct CsvSink<W: Write + Send = BufWriter<File>> {
    path: PathBuf,
    open: fn(&Path) -> anyhow::Result<W>,
    inventory: Option<CsvInventory<W>>,
    held: Option<Vec<Row>>,
}

impl CsvSink {
    pub fn new(path: PathBuf, sort: bool) -> Self {
        Self::with_opener(path, sort, create_file)
    }
}

fn create_file(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

impl<W: Write + Send> CsvSink<W> {
    fn with_opener(path: PathBuf, sort: bool, open: fn(&Path) -> anyhow::Result<W>) -> Self {
        Self {
            path,
            open,
            inventory: None,
            held: sort.then(Vec::new),
        }
    }

    fn inventory(&mut self) -> anyhow::Result<&mut CsvInventory<W>> {
        if self.inventory.is_none() {
            let inner = (self.open)(&self.path)?;
            let inventory = CsvInventory::new(inner)
                .with_context(|| format!("failed to write headers to {}", self.path.display()))?;
            self.inventory = Some(inventory);
        }
        self.inventory
            .as_mut()
            .context("inventory output is not open")
    }

    fn write(&mut self, row: &Row) -> anyhow::Result<()> {
        let path = self.path.clone();
        self.inventory()?.write_row(row).with_context(|| {
            format!(
                "failed to write {} to {}",
                row.unique_asset_identifier,
                path.display()
            )
        })
    }
}

impl<W: Write + Send> RowSink for CsvSink<W> {
    fn process(&mut self, row: Row) -> anyhow::Result<()> {
        spinner::report_collection_progress(&row.asset_type);

        match self.held.as_mut() {
            Some(held) => {
                held.push(row);
                Ok(())
            }
            None => self.write(&row),
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        if let Some(mut held) = self.held.take() {
            held.sort_by(|a, b| a.unique_asset_identifier.cmp(&b.unique_asset_identifier));
            let mut first_error = None;
            for row in &held {
                if let Err(e) = self.write(row) {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        self.inventory()?
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))
    }
}
