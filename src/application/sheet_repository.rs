// Repository trait for spreadsheet access
use crate::domain::sheet_layout::Rows;
use async_trait::async_trait;

#[async_trait]
pub trait SheetRepository: Send + Sync {
    /// Fetch the configured cell window as text, row-major.
    /// Rows may be ragged or shorter than the window; trailing blanks are often omitted.
    async fn fetch_rows(&self) -> anyhow::Result<Rows>;
}
