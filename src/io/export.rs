use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::format_amount;

/// Exporter for converting the ledger to interchange formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export all transactions to CSV, in stored order.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["id", "description", "amount", "type", "occurred_at"])?;

        let mut count = 0;
        for transaction in self.service.records() {
            csv_writer.write_record([
                transaction.id.to_string(),
                transaction.description.clone(),
                format_amount(transaction.amount),
                transaction.kind.as_str().to_string(),
                transaction.occurred_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export all transactions as a JSON array (the slot wire format).
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let records = self.service.records();

        let json = serde_json::to_string_pretty(records)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(records.len())
    }
}
