use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Appends a message to `logs/<filename>` with a wall-clock entry header.
/// Used by the host glue to keep a plain-text trail of indicator decisions.
pub fn log_to_file(filename: &str, message: &str) -> io::Result<()> {
    let log_dir = "logs";
    if !Path::new(log_dir).exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let path = format!("{}/{}", log_dir, filename);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    writeln!(file, "[{}] {}", timestamp, message)?;
    file.flush()?;

    Ok(())
}
