// 📊 Batch Validation - sequential loop over single validations
// Report order always matches input order.

use crate::birthdate::current_year;
use crate::region::RegionDirectory;
use crate::validator::{validate_as_of, Verdict};
use serde::Serialize;
use std::io::{self, BufRead};

// ============================================================================
// BATCH REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    /// 1-based position in the input
    pub index: usize,
    pub input: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub valid_count: usize,
    pub total: usize,
}

impl BatchReport {
    pub fn invalid_count(&self) -> usize {
        self.total - self.valid_count
    }

    pub fn summary(&self) -> String {
        format!("验证结果: {}个有效 / {}个总数", self.valid_count, self.total)
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

pub fn validate_batch<I, S>(inputs: I, regions: &RegionDirectory) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    validate_batch_as_of(inputs, regions, current_year())
}

pub fn validate_batch_as_of<I, S>(inputs: I, regions: &RegionDirectory, current_year: i32) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let entries: Vec<BatchEntry> = inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| BatchEntry {
            index: i + 1,
            input: input.as_ref().to_string(),
            verdict: validate_as_of(input.as_ref(), regions, current_year),
        })
        .collect();

    let valid_count = entries.iter().filter(|e| e.verdict.is_valid()).count();
    let total = entries.len();

    tracing::info!("Batch validated: {} valid of {}", valid_count, total);

    BatchReport {
        entries,
        valid_count,
        total,
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Read trimmed lines until the first blank line or EOF (interactive mode)
pub fn read_until_blank<R: BufRead>(reader: &mut R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = String::new();

    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }

    Ok(lines)
}

/// Read every non-blank trimmed line to EOF (piped mode)
pub fn read_all_nonblank<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

// ============================================================================
// TESTS
// ============================================================================
