//! CSV output.

use std::{fs::File, io, path::Path};

use tracing::info;

use crate::{error::ExportError, types::NormalizedTrade};

/// Header row of every export table.
pub const HEADER: [&str; 6] = [
    "Item Name",
    "Price",
    "Float",
    "Type",
    "Date",
    "CSFloat Transaction ID",
];

/// Writes the header and one row per trade, in the given order.
pub fn write_trades<W: io::Write>(trades: &[NormalizedTrade], writer: W) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for trade in trades {
        writer.write_record(trade.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the trades to `path`, replacing any previous content.
///
/// Returns the number of exported rows.
pub fn export(trades: &[NormalizedTrade], path: impl AsRef<Path>) -> Result<usize, ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_trades(trades, io::BufWriter::new(file))?;

    info!(
        count = trades.len(),
        path = %path.display(),
        "Successfully exported trades"
    );
    Ok(trades.len())
}
