//! C++ header generation from the normalized list.
//!
//! The header carries a fixed comment block followed by an include-guarded
//! `static const std::set<std::string>` holding every entry in file order.

use crate::config::TldConfig;
use crate::error::{Step, TldError};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const SEPARATOR: &str = "// -----------------------------------------------------------";

/// Full IANA root zone database, cited in the header comment.
pub const IANA_ROOT_DB_URL: &str = "https://www.iana.org/domains/root/db";

/// Values interpolated into the header.
#[derive(Debug, Clone)]
pub struct HeaderContext<'a> {
    /// Base URL the list was taken from.
    pub source_base: &'a str,
    pub custom_tlds: &'a [String],
    pub generated_at: &'a str,
    pub project_url: &'a str,
    pub guard: &'a str,
    pub constant_name: &'a str,
}

/// Result of [`generate_header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenSummary {
    pub path: PathBuf,
    /// Non-empty lines in the normalized file.
    pub total: usize,
    /// Configured custom TLDs included in `total`.
    pub custom: usize,
}

impl CodegenSummary {
    /// Console summary, e.g. `Total TLDs in list: 3 (including 1 custom TLDs)`.
    pub fn summary_line(&self) -> String {
        format!(
            "Total TLDs in list: {} (including {} custom TLDs)",
            self.total, self.custom
        )
    }
}

/// Timestamp for the `// Updated` line, local time.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Include guard from the header file name: `iana-tlds.h` -> `IANA_TLDS_H`.
pub fn include_guard(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut guard: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if guard.is_empty() || guard.starts_with(|c: char| c.is_ascii_digit()) {
        guard.insert(0, '_');
    }
    guard
}

/// Directory part of the source URL, e.g. `https://data.iana.org/TLD/`.
/// Query and fragment are dropped. Unparseable input is returned unchanged.
fn source_base(url: &str) -> String {
    match url::Url::parse(url).and_then(|u| u.join("./")) {
        Ok(base) => base.to_string(),
        Err(e) => {
            tracing::debug!("cannot derive base of {}: {}", url, e);
            url.to_string()
        }
    }
}

/// Quote `s` as a C++ string literal.
fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn write_comment_block<W: Write>(out: &mut W, ctx: &HeaderContext<'_>) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "//")?;
    writeln!(out, "// Full list of TLDs: {IANA_ROOT_DB_URL}")?;
    writeln!(out, "// Source used for the include: {}", ctx.source_base)?;
    writeln!(out, "// The {} excludes \"test\" TLDs found in the full list.", ctx.constant_name)?;
    writeln!(out, "// Entries converted already to UTF-8 from Punycode.")?;
    writeln!(out, "// Custom TLDs added: {}", ctx.custom_tlds.join(", "))?;
    writeln!(out, "// Updated {}", ctx.generated_at)?;
    writeln!(out)?;
    writeln!(out, "// If you need to update the TLD list, use this repository:")?;
    writeln!(out, "// {}", ctx.project_url)?;
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)
}

/// Render the header for `entries`. Entries are trimmed; empty ones are skipped.
/// Returns the number of literals written.
pub fn write_header<W, I, S>(mut out: W, entries: I, ctx: &HeaderContext<'_>) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    write_comment_block(&mut out, ctx)?;

    writeln!(out, "#ifndef {}", ctx.guard)?;
    writeln!(out, "#define {}\n", ctx.guard)?;
    writeln!(out, "#include <set>")?;
    writeln!(out, "#include <string>\n")?;
    writeln!(out, "static const std::set<std::string> {} = {{", ctx.constant_name)?;

    let mut written = 0usize;
    for entry in entries {
        let entry = entry.as_ref().trim();
        if entry.is_empty() {
            continue;
        }
        if written > 0 {
            writeln!(out, ",")?;
        }
        write!(out, "    {}", string_literal(entry))?;
        written += 1;
    }

    writeln!(out, "\n}};\n")?;
    writeln!(out, "#endif // {}", ctx.guard)?;
    out.flush()?;
    Ok(written)
}

/// Count non-empty lines in `path`.
pub fn count_entries(path: &Path) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut n = 0;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            n += 1;
        }
    }
    Ok(n)
}

/// Render `cfg.normalized_path` into `cfg.header_path`.
pub fn generate_header(cfg: &TldConfig, generated_at: &str) -> Result<CodegenSummary, TldError> {
    let in_path = &cfg.normalized_path;
    let out_path = &cfg.header_path;

    let reader = match File::open(in_path) {
        Ok(f) => BufReader::new(f),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TldError::MissingInput {
                path: in_path.clone(),
                step: Step::Codegen,
            });
        }
        Err(e) => return Err(TldError::io(in_path, e)),
    };
    let entries = reader
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .map_err(|e| TldError::io(in_path, e))?;

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TldError::io(parent, e))?;
    }

    let guard = include_guard(out_path);
    let base = source_base(&cfg.source_url);
    let ctx = HeaderContext {
        source_base: &base,
        custom_tlds: &cfg.custom_tlds,
        generated_at,
        project_url: &cfg.project_url,
        guard: &guard,
        constant_name: &cfg.constant_name,
    };

    let literals = {
        let file = File::create(out_path).map_err(|e| TldError::io(out_path, e))?;
        write_header(BufWriter::new(file), &entries, &ctx).map_err(|e| TldError::io(out_path, e))?
    };
    tracing::info!("wrote {} entries to {}", literals, out_path.display());

    let total = count_entries(in_path).map_err(|e| TldError::io(in_path, e))?;
    Ok(CodegenSummary {
        path: out_path.clone(),
        total,
        custom: cfg.custom_tlds.len(),
    })
}
