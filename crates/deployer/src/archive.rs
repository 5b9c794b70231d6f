use folio_relay_core::{DeployError, Result};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const INDEX_FILE: &str = "index.html";
pub const HEADERS_FILE: &str = "_headers";
pub const CONFIG_FILE: &str = "netlify.toml";

/// Response header rules applied by the host
pub const HEADERS_CONTENT: &str = "/*
  X-Frame-Options: DENY
  X-Content-Type-Options: nosniff
  Referrer-Policy: strict-origin-when-cross-origin

/index.html
  Content-Type: text/html; charset=UTF-8
";

/// Publish the archive root and route every path to the single page
pub const CONFIG_CONTENT: &str = r#"[build]
  publish = "."

[[redirects]]
  from = "/*"
  to = "/index.html"
  status = 200
"#;

/// Package an HTML document as a deployable zip.
///
/// Entries are written in a fixed order with a fixed timestamp, so the same
/// HTML always yields the same bytes.
pub fn build_archive(html: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let entries = [
        (INDEX_FILE, html),
        (HEADERS_FILE, HEADERS_CONTENT),
        (CONFIG_FILE, CONFIG_CONTENT),
    ];

    for (name, content) in entries {
        zip.start_file(name, options).map_err(archive_err)?;
        zip.write_all(content.as_bytes())
            .map_err(|e| DeployError::Archive(format!("writing {}: {}", name, e)))?;
    }

    let cursor = zip.finish().map_err(archive_err)?;
    Ok(cursor.into_inner())
}

fn archive_err(err: zip::result::ZipError) -> DeployError {
    DeployError::Archive(err.to_string())
}
