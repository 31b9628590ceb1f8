//! Branch-name generation for document runs.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hard ceiling on a generated branch name's length.
pub const MAX_BRANCH_NAME_LEN: usize = 60;

/// Longest slug kept from the title before the uniqueness suffix.
const MAX_SLUG_LEN: usize = 40;

/// Fallback slug for titles with no usable characters.
const EMPTY_SLUG: &str = "prd";

/// Millisecond stamp of the previous generation, kept strictly increasing
/// so two calls in the same millisecond still produce distinct names.
static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Generates a branch name from a document title.
///
/// Lower-kebab-cases the title, truncates it, and appends a base-36
/// millisecond stamp. Two calls with the same title always differ, and the
/// result never exceeds [`MAX_BRANCH_NAME_LEN`].
#[must_use]
pub fn generate_branch_name(title: &str) -> String {
    let slug = kebab_slug(title);
    let stamp = to_base36(next_stamp());
    format!("{slug}-{stamp}")
}

/// Lower-kebab-cases a title: alphanumeric runs joined by single dashes.
fn kebab_slug(title: &str) -> String {
    let mut slug = String::with_capacity(MAX_SLUG_LEN);
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lowered in ch.to_lowercase() {
                slug.push(lowered);
            }
        } else {
            pending_dash = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    let truncated: String = slug.chars().take(MAX_SLUG_LEN).collect();
    let trimmed = truncated.trim_end_matches('-');
    if trimmed.is_empty() {
        EMPTY_SLUG.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Returns a strictly increasing millisecond stamp.
fn next_stamp() -> u64 {
    let now = Utc::now().timestamp_millis().max(0);
    let updated = LAST_STAMP.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(now.max(last.saturating_add(1)))
    });
    match updated {
        Ok(previous) => now.max(previous.saturating_add(1)).unsigned_abs(),
        Err(_) => now.unsigned_abs(),
    }
}

/// Encodes a value in lowercase base-36.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    clippy::cast_possible_truncation,
    reason = "base-36 digit extraction divides by a non-zero constant"
)]
fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_owned();
    }
    let mut encoded = Vec::new();
    while value > 0 {
        let digit = (value % 36) as usize;
        encoded.push(DIGITS.get(digit).copied().unwrap_or(b'0'));
        value /= 36;
    }
    encoded.reverse();
    String::from_utf8(encoded).unwrap_or_else(|_| "0".to_owned())
}
