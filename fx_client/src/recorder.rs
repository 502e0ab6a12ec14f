//! Append-only record of fetched bids.
//!
//! Each successful fetch adds one `Dolar: <bid>\n` line. The line is formatted
//! in full before the file is opened and written with a single call, so a
//! failed invocation never leaves a partial entry behind.
use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::ClientError;

/// Line recorded for `bid`, with six decimal places.
pub fn format_entry(bid: f64) -> String {
    format!("Dolar: {:.6}\n", bid)
}

/// Append the entry for `bid` to `path`, creating the file if absent.
pub async fn append_entry(path: &Path, bid: f64) -> Result<(), ClientError> {
    let line = format_entry(bid);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_uses_six_decimals() {
        assert_eq!(format_entry(5.05), "Dolar: 5.050000\n");
        assert_eq!(format_entry(4.95241), "Dolar: 4.952410\n");
    }

    #[tokio::test]
    async fn appends_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");

        append_entry(&path, 5.05).await.unwrap();
        append_entry(&path, 5.1).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "Dolar: 5.050000\nDolar: 5.100000\n");
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("cotacao.txt");

        assert!(matches!(append_entry(&path, 5.05).await, Err(ClientError::Io(_))));
        assert!(!path.exists());
    }
}
