//! Bracket-variant expansion.

/// Joiner symbol trimmed next to spliced bracket groups, alongside
/// whitespace.
pub const JOINER: char = '_';

/// Expand every optional parenthesis group into its variant strings.
///
/// For a string with non-nested, balanced parenthesis groups, produce all
/// combinations of each group being dropped entirely (delimiters and
/// content) or kept without its delimiters. Each variant is trimmed of
/// whitespace and then of the [`JOINER`] symbol at both ends, so splice
/// points do not leave separators dangling.
///
/// The result is in deterministic recursion order - for each group, the
/// dropped-group variants come before the kept-content variants - and
/// duplicates arising from trimming are preserved, so callers can index
/// variants positionally. An input with `k` groups yields up to `2^k`
/// variants.
///
/// ```
/// use orthophon::normalize::expand_brackets;
///
/// let variants = expand_brackets("(no )bracket(s)");
/// assert_eq!(variants, vec!["bracket", "brackets", "no bracket", "no brackets"]);
/// assert_eq!(expand_brackets("plain"), vec!["plain"]);
/// ```
pub fn expand_brackets(input: &str) -> Vec<String> {
    match first_group(input) {
        None => vec![input.to_string()],
        Some((open, close)) => {
            let mut variants = Vec::new();
            let dropped = format!("{}{}", &input[..open], &input[close + 1..]);
            for variant in expand_brackets(&dropped) {
                variants.push(trim_splice(&variant));
            }
            let kept = format!(
                "{}{}{}",
                &input[..open],
                &input[open + 1..close],
                &input[close + 1..]
            );
            for variant in expand_brackets(&kept) {
                variants.push(trim_splice(&variant));
            }
            variants
        }
    }
}

/// Byte offsets of the first balanced `(...)` group, if any.
fn first_group(s: &str) -> Option<(usize, usize)> {
    let open = s.find('(')?;
    let close = s.find(')')?;
    (close > open).then_some((open, close))
}

fn trim_splice(s: &str) -> String {
    s.trim().trim_matches(JOINER).to_string()
}
