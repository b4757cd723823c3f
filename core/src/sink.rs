use awsinv_common::inventory::Row;
use tracing::debug;

/// Receives every row of a run, one at a time, on the consumer task.
///
/// A failing sink is logged and keeps receiving rows; it never stops the
/// collectors or the consumer.
pub trait RowSink: Send {
    fn process(&mut self, row: Row) -> anyhow::Result<()>;

    /// Called once after the last row of the run.
    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<F> RowSink for F
where
    F: FnMut(Row) -> anyhow::Result<()> + Send,
{
    fn process(&mut self, row: Row) -> anyhow::Result<()> {
        self(row)
    }
}

/// Drops rows, logging their receipt.
#[derive(Debug, Default)]
pub struct DiscardSink;

impl RowSink for DiscardSink {
    fn process(&mut self, row: Row) -> anyhow::Result<()> {
        debug!(
            "received {}: {}",
            row.asset_type, row.unique_asset_identifier
        );
        Ok(())
    }
}
