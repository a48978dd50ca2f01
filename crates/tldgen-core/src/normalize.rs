//! Raw IANA list -> lowercase UTF-8 list with custom TLDs first.

use crate::config::TldConfig;
use crate::error::{Step, TldError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

/// ASCII Compatible Encoding prefix of Punycode labels.
pub const ACE_PREFIX: &str = "xn--";

/// Counters reported after a normalize pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Custom entries written ahead of the list.
    pub custom: usize,
    /// Entries taken from the raw list.
    pub listed: usize,
    /// `xn--` entries decoded to UTF-8.
    pub decoded: usize,
    /// `xn--` entries kept in ACE form because decoding failed.
    pub fallbacks: usize,
}

impl NormalizeStats {
    pub fn total(&self) -> usize {
        self.custom + self.listed
    }
}

/// A normalized raw-list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Lowercase label without the ACE prefix.
    Plain(String),
    /// `xn--` label decoded to UTF-8.
    Decoded(String),
    /// `xn--` label that did not decode; kept lowercase.
    Undecodable(String),
}

impl Normalized {
    pub fn as_str(&self) -> &str {
        match self {
            Normalized::Plain(s) | Normalized::Decoded(s) | Normalized::Undecodable(s) => s,
        }
    }
}

/// Normalize one raw line. Blank lines and `#` comments yield `None`.
pub fn normalize_line(line: &str) -> Option<Normalized> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let lower = line.to_lowercase();
    if !lower.starts_with(ACE_PREFIX) {
        return Some(Normalized::Plain(lower));
    }

    match decode_ace(&lower) {
        Some(decoded) => Some(Normalized::Decoded(decoded)),
        None => Some(Normalized::Undecodable(lower)),
    }
}

/// UTS #46 decode of an ACE label. `None` if IDNA reports any error.
fn decode_ace(label: &str) -> Option<String> {
    let (decoded, result) = idna::domain_to_unicode(label);
    match result {
        Ok(()) if !decoded.is_empty() => Some(decoded),
        Ok(()) => None,
        Err(e) => {
            tracing::debug!("cannot decode {}: {:?}", label, e);
            None
        }
    }
}

/// Write `custom` then every normalized line of `raw`, one entry per line.
pub fn normalize_list<R: BufRead, W: Write>(
    raw: R,
    custom: &[String],
    mut out: W,
) -> io::Result<NormalizeStats> {
    let mut stats = NormalizeStats::default();

    for tld in custom {
        writeln!(out, "{}", tld.trim().to_lowercase())?;
        stats.custom += 1;
    }

    for line in raw.lines() {
        let line = line?;
        let Some(entry) = normalize_line(&line) else {
            continue;
        };
        match &entry {
            Normalized::Plain(_) => {}
            Normalized::Decoded(_) => stats.decoded += 1,
            Normalized::Undecodable(raw) => {
                tracing::debug!("keeping undecodable label {}", raw);
                stats.fallbacks += 1;
            }
        }
        writeln!(out, "{}", entry.as_str())?;
        stats.listed += 1;
    }

    out.flush()?;
    Ok(stats)
}

/// Normalize `cfg.raw_path` into `cfg.normalized_path`.
pub fn normalize_file(cfg: &TldConfig) -> Result<NormalizeStats, TldError> {
    let raw_path = &cfg.raw_path;
    let out_path = &cfg.normalized_path;

    let raw = match File::open(raw_path) {
        Ok(f) => BufReader::new(f),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TldError::MissingInput {
                path: raw_path.clone(),
                step: Step::Normalize,
            });
        }
        Err(e) => return Err(TldError::io(raw_path, e)),
    };
    let out = File::create(out_path).map_err(|e| TldError::io(out_path, e))?;

    tracing::info!(
        "normalizing {} -> {} with {} custom TLDs",
        raw_path.display(),
        out_path.display(),
        cfg.custom_tlds.len()
    );

    // Read and write errors both surface as io::Error here; attribute them to the output.
    let stats = normalize_list(raw, &cfg.custom_tlds, BufWriter::new(out))
        .map_err(|e| TldError::io(out_path, e))?;

    tracing::info!(
        "normalized {} entries ({} custom, {} decoded, {} kept as ACE)",
        stats.total(),
        stats.custom,
        stats.decoded,
        stats.fallbacks
    );
    Ok(stats)
}
