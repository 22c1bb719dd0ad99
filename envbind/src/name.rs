//! Field identifier to environment key conversion

/// Convert a mixed-case identifier into lowercase `snake_case`.
///
/// A separator is inserted before an uppercase letter when the previous
/// character is lowercase or a digit, or when the next character is
/// lowercase, so acronym runs stay together: `HomeURL` becomes `home_url`,
/// `URLValue` becomes `url_value` and `S3Bucket` becomes `s3_bucket`.
/// Input that is already `snake_case` comes back unchanged.
pub fn derive(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }

        if i > 0 && chars[i - 1] != '_' {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || next_lower {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Convert an identifier into its uppercase key fragment.
pub fn key_fragment(ident: &str) -> String {
    derive(ident).to_uppercase()
}
