//! Filename sanitization and storage-key derivation.
//!
//! Uploaded filenames arrive in whatever form the browser sends them and end
//! up as object-store keys, so they are normalized to a safe ASCII subset
//! before use. Keys embed a unix timestamp and an asset-kind prefix so the
//! same filename can be uploaded repeatedly without trampling earlier blobs
//! (outside the same-second window, see [`storage_key`]).

use std::time::{SystemTime, UNIX_EPOCH};

use unicode_normalization::UnicodeNormalization;

/// Normalize an arbitrary filename into the `[A-Za-z0-9._-]` character set.
///
/// Accented characters are decomposed (NFKD) and reduced to their ASCII base
/// character; remaining non-ASCII code points are discarded; anything else
/// outside the safe set becomes `_`. The function is a fixed point on its own
/// output: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(name: &str) -> String {
    name.nfkd()
        .filter(|c| c.is_ascii())
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Derive the storage key for an upload at an explicit timestamp.
///
/// Format: `{prefix}_{unix_secs}_{sanitize(name)}`. The prefix distinguishes
/// asset kinds (`gal`, `promo`) and may be empty in the storage-only
/// configuration, in which case the leading separator is kept.
///
/// Two uploads of identically-named files within the same second and prefix
/// produce the same key. There is no locking or dedup around this window.
pub fn storage_key(prefix: &str, unix_secs: u64, name: &str) -> String {
    format!("{prefix}_{unix_secs}_{}", sanitize(name))
}

/// Derive the storage key for an upload happening now.
pub fn storage_key_now(prefix: &str, name: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    storage_key(prefix, now, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_safe_set(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    }

    #[test]
    fn output_stays_in_safe_character_set() {
        for name in [
            "simple.png",
            "with spaces and (parens).jpg",
            "Ação-émoji-🎉.webp",
            "日本語.gif",
            "..--__..",
        ] {
            assert!(in_safe_set(&sanitize(name)), "unsafe output for {name:?}");
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in ["Foto Café.png", "weird~!@#$.jpg", "ünïcödé.png", ""] {
            let once = sanitize(name);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn accents_reduce_to_ascii_base() {
        assert_eq!(sanitize("Foto Café.png"), "Foto_Cafe.png");
        assert_eq!(sanitize("promoção.jpg"), "promocao.jpg");
    }

    #[test]
    fn non_decomposable_codepoints_are_discarded() {
        assert_eq!(sanitize("日本a.png"), "a.png");
    }

    #[test]
    fn unsafe_ascii_becomes_underscore() {
        assert_eq!(sanitize("a b/c:d.png"), "a_b_c_d.png");
    }

    #[test]
    fn key_format_embeds_prefix_and_timestamp() {
        let key = storage_key("gal", 1_700_000_000, "Foto Café.png");
        assert_eq!(key, "gal_1700000000_Foto_Cafe.png");
    }

    #[test]
    fn empty_prefix_keeps_literal_format() {
        let key = storage_key("", 42, "x.png");
        assert_eq!(key, "_42_x.png");
    }

    #[test]
    fn distinct_names_never_collide_within_a_second() {
        let a = storage_key("gal", 100, "one.png");
        let b = storage_key("gal", 100, "two.png");
        assert_ne!(a, b);
    }

    #[test]
    fn identical_names_collide_within_a_second() {
        let a = storage_key("gal", 100, "same.png");
        let b = storage_key("gal", 100, "same.png");
        assert_eq!(a, b);
    }

    #[test]
    fn key_now_uses_current_clock() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let key = storage_key_now("gal", "x.png");
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let ts: u64 = key
            .strip_prefix("gal_")
            .and_then(|rest| rest.split('_').next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(ts >= before && ts <= after);
    }
}
