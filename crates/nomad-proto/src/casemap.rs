//! RFC 1459 casemapping.
//!
//! Nicknames and channel names compare case-insensitively, with `[]\~`
//! folding onto `{}|^`. Registries key on [`irc_to_lower`].

/// Fold one character under RFC 1459 rules.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => c.to_ascii_lowercase(),
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a whole name for use as a registry key.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Case-insensitive name comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars()
            .zip(b.chars())
            .all(|(x, y)| irc_lower_char(x) == irc_lower_char(y))
}

/// Match a `nick!user@host` style mask with `*` and `?` wildcards,
/// folding case under RFC 1459 rules.
///
/// ```
/// use nomad_proto::mask_match;
///
/// assert!(mask_match("*!*@*.example.org", "dan!d@Host.Example.ORG"));
/// assert!(mask_match("d?n!*@*", "DAN!d@h"));
/// assert!(!mask_match("*!root@*", "dan!d@h"));
/// ```
pub fn mask_match(mask: &str, text: &str) -> bool {
    let mask: Vec<char> = mask.chars().map(irc_lower_char).collect();
    let text: Vec<char> = text.chars().map(irc_lower_char).collect();

    let (mut m, mut t) = (0, 0);
    // Last `*` seen and the text position it is currently covering up to.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match mask.get(m) {
            Some('*') => {
                star = Some((m, t));
                m += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                m += 1;
                t += 1;
            }
            _ => match star {
                Some((sm, st)) => {
                    star = Some((sm, st + 1));
                    m = sm + 1;
                    t = st + 1;
                }
                None => return false,
            },
        }
    }

    mask[m..].iter().all(|&c| c == '*')
}
